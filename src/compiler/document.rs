//! The compiled map document and its JSON form
//!
//! ```json
//! {
//!   "nodes": [{ "node": 0, "center": {"x": 50, "y": 40}, "data": "...", "iconData": "...", "castle": {...}? }],
//!   "edges": [{ "a": 0, "b": 1 }],
//!   "waterConnections": [{ "a": 0, "b": 2, "midpoints": [[x, y]]?, "tension": 0.5? }],
//!   "size": { "a": 400, "b": 300 },
//!   "regions": [{ "a": 0, "b": 4 }]
//! }
//! ```

use crate::compiler::connection::Connection;
use crate::compiler::region::Region;
use crate::compiler::territory::Territory;
use crate::core::error::Result;
use serde::Serialize;
use std::path::Path;

/// Declared document extent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    #[serde(rename = "a")]
    pub width: f64,
    #[serde(rename = "b")]
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    /// Territories in source order, ids unique
    #[serde(rename = "nodes")]
    pub territories: Vec<Territory>,
    pub edges: Vec<Connection>,
    #[serde(rename = "waterConnections")]
    pub water_connections: Vec<Connection>,
    pub size: Size,
    pub regions: Vec<Region>,
}

impl MapDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the document as JSON, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::connection::ConnectionKind;
    use crate::core::types::{Point, TerritoryId};
    use serde_json::json;

    fn sample() -> MapDocument {
        MapDocument {
            territories: vec![Territory {
                id: TerritoryId(0),
                center: Point::new(50.0, 40.0),
                outline: "M10,10 90,10 50,90z".into(),
                icon: "M0,0 100,0 50,100z".into(),
                fortification: Some(Point::new(1.5, 2.0)),
                style_class: Some("st0".into()),
            }],
            edges: vec![Connection {
                from: TerritoryId(0),
                to: TerritoryId(1),
                kind: ConnectionKind::Edge,
                midpoints: Vec::new(),
                tension: None,
            }],
            water_connections: Vec::new(),
            size: Size {
                width: 400.0,
                height: 300.0,
            },
            regions: vec![Region {
                start: TerritoryId(0),
                end: TerritoryId(0),
            }],
        }
    }

    #[test]
    fn test_json_schema() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [{
                    "node": 0,
                    "center": {"x": 50.0, "y": 40.0},
                    "data": "M10,10 90,10 50,90z",
                    "iconData": "M0,0 100,0 50,100z",
                    "castle": {"x": 1.5, "y": 2.0}
                }],
                "edges": [{"a": 0, "b": 1}],
                "waterConnections": [],
                "size": {"a": 400.0, "b": 300.0},
                "regions": [{"a": 0, "b": 0}]
            })
        );
    }

    #[test]
    fn test_castle_omitted_when_absent() {
        let mut doc = sample();
        doc.territories[0].fortification = None;
        let text = doc.to_json().unwrap();
        assert!(!text.contains("castle"));
        assert!(!text.contains("st0"));
    }
}
