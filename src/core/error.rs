use crate::core::types::{Point, TerritoryId};
use thiserror::Error;

/// File-level failures. One of these aborts the current source file only.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Record-level problems found while compiling one source file.
///
/// None of these stop compilation: the offending record is skipped or the
/// affected feature is disabled, and the diagnostic lands in the report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("no stroke-width style definitions; water connections disabled")]
    MissingStyleDefinition,

    #[error("connection group {group} mixes style classes {classes:?}; group skipped")]
    AmbiguousGroupStyle { group: usize, classes: Vec<String> },

    #[error("connection endpoint {point} is farther than {tolerance} from every territory center")]
    UnmatchedConnectionEndpoint { point: Point, tolerance: f64 },

    #[error("connection in group {group} has unreadable coordinates: {reason}")]
    MalformedConnection { group: usize, reason: String },

    #[error("malformed territory (id: {id:?}, center: {center:?}, outline: {outline:?})")]
    MalformedTerritory {
        id: Option<u32>,
        center: Option<Point>,
        outline: Option<String>,
    },

    #[error("duplicate territory id {0}; later definition discarded")]
    DuplicateTerritory(TerritoryId),

    #[error("style classes {sequence:?} do not form contiguous id ranges; regions dropped")]
    NonContiguousRegionClasses { sequence: Vec<Option<String>> },

    #[error("invalid or missing viewBox: {0}")]
    InvalidBounds(String),
}
