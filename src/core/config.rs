//! Compiler configuration with documented constants
//!
//! Every tunable number of the pipeline lives here. Nothing reads these
//! from global state: the config is passed into the compiler explicitly.

use crate::core::error::{MapError, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration for one compiler run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    // === MATCHING ===
    /// Maximum distance between a connection endpoint and a territory
    /// center for the two to be treated as the same point (source units)
    pub tolerance: f64,

    // === PRECISION ===
    /// Decimal places kept for structural geometry: outlines, centers,
    /// fortification anchors and water midpoints
    pub map_precision: u32,

    /// Decimal places kept for icon paths
    ///
    /// Icons are small previews, so they get fewer digits than the map.
    /// Must not exceed `map_precision`.
    pub icon_precision: u32,

    /// Decimal places kept for the document size
    pub size_precision: u32,

    // === ICONS ===
    /// Side length of the square every icon is fitted into
    pub preview_size: f64,

    // === BATCH ===
    /// Extension of the files picked up from the input directory
    pub source_extension: String,

    /// Extension replacing the source extension on output files
    pub output_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            tolerance: 15.0,

            map_precision: 2,
            icon_precision: 1,
            size_precision: 1,

            preview_size: 100.0,

            source_extension: "svg".to_string(),
            output_extension: "json".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "tolerance ({}) must be positive",
                self.tolerance
            )));
        }

        if !(self.preview_size > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "preview_size ({}) must be positive",
                self.preview_size
            )));
        }

        if self.icon_precision > self.map_precision {
            return Err(MapError::InvalidConfig(format!(
                "icon_precision ({}) should be <= map_precision ({})",
                self.icon_precision, self.map_precision
            )));
        }

        if self.source_extension.is_empty() || self.output_extension.is_empty() {
            return Err(MapError::InvalidConfig("file extensions must not be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CompilerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CompilerConfig::from_toml_str("tolerance = 20.0\nicon_precision = 0\n").unwrap();
        assert_eq!(config.tolerance, 20.0);
        assert_eq!(config.icon_precision, 0);
        assert_eq!(config.map_precision, 2);
        assert_eq!(config.preview_size, 100.0);
    }

    #[test]
    fn test_icon_precision_above_map_precision_rejected() {
        let result = CompilerConfig::from_toml_str("map_precision = 1\nicon_precision = 3\n");
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = CompilerConfig {
            tolerance: -1.0,
            ..CompilerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = CompilerConfig::from_toml_str("tolerance = [");
        assert!(matches!(result, Err(MapError::ConfigParseError(_))));
    }
}
