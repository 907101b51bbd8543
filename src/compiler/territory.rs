//! Territory records built from labelled groups

use crate::core::config::CompilerConfig;
use crate::core::error::Diagnostic;
use crate::core::types::{Point, TerritoryId};
use crate::geometry::{icon_path, normalize_source, round_value, PathSource};
use crate::source::{OutlineShape, RawGroup, RawNode};
use serde::Serialize;

/// One compiled territory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Territory {
    #[serde(rename = "node")]
    pub id: TerritoryId,
    pub center: Point,
    /// Normalized outline at map precision
    #[serde(rename = "data")]
    pub outline: String,
    /// Outline fitted into the preview square at icon precision
    #[serde(rename = "iconData")]
    pub icon: String,
    #[serde(rename = "castle", skip_serializing_if = "Option::is_none")]
    pub fortification: Option<Point>,
    /// Style class of the outline; drives region grouping
    #[serde(skip)]
    pub style_class: Option<String>,
}

pub(crate) fn round_point(point: Point, precision: u32) -> Point {
    Point::new(round_value(point.x, precision), round_value(point.y, precision))
}

pub struct TerritoryBuilder<'a> {
    config: &'a CompilerConfig,
}

impl<'a> TerritoryBuilder<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Build a territory from a labelled group.
    ///
    /// Fails with [`Diagnostic::MalformedTerritory`] carrying whatever was
    /// readable when the id, center, or outline is missing.
    pub fn build(&self, group: &RawGroup) -> Result<Territory, Diagnostic> {
        let mut outline_node = None;
        let mut label = None;
        let mut center_marker = None;
        let mut fortification_marker = None;

        // first child of each kind wins
        for child in &group.children {
            match child {
                RawNode::Outline(outline) => {
                    outline_node.get_or_insert(outline);
                }
                RawNode::Label(text) => {
                    label.get_or_insert(text);
                }
                RawNode::CenterMarker(point) => {
                    center_marker.get_or_insert(*point);
                }
                RawNode::FortificationMarker(point) => {
                    fortification_marker.get_or_insert(*point);
                }
                RawNode::Line(_) | RawNode::Polyline(_) | RawNode::Other => {}
            }
        }

        let precision = self.config.map_precision;

        let outline = outline_node.and_then(|node| {
            let source = match &node.shape {
                OutlineShape::Polygon(points) => PathSource::ClosedPoints(points),
                OutlineShape::Path(data) => PathSource::Data(data),
            };
            normalize_source(source, precision)
                .map_err(|e| tracing::debug!("Outline rejected: {}", e))
                .ok()
        });
        let style_class = outline_node.and_then(|node| node.class.clone());
        let center = center_marker.flatten().map(|p| round_point(p, precision));
        let fortification = fortification_marker.flatten().map(|p| round_point(p, precision));
        let id = label.and_then(|text| text.parse::<u32>().ok());

        let malformed = |outline: Option<String>| Diagnostic::MalformedTerritory {
            id,
            center,
            outline,
        };

        let (Some(id), Some(center), Some(outline)) = (id, center, outline.clone()) else {
            return Err(malformed(outline));
        };

        let icon = icon_path(&outline, self.config.preview_size, self.config.icon_precision)
            .map_err(|_| malformed(Some(outline.clone())))?;

        Ok(Territory {
            id: TerritoryId(id),
            center,
            outline,
            icon,
            fortification,
            style_class,
        })
    }
}
