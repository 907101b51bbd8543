//! Connection classification (land edges vs water routes) and resolution

use crate::compiler::matcher::CenterIndex;
use crate::compiler::report::CompileReport;
use crate::compiler::territory::round_point;
use crate::core::error::Diagnostic;
use crate::core::types::{Point, TerritoryId};
use crate::source::{RawGroup, RawNode, StyleMap};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    Edge,
    Water,
}

/// A resolved connection between two territories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    #[serde(rename = "a")]
    pub from: TerritoryId,
    #[serde(rename = "b")]
    pub to: TerritoryId,
    #[serde(skip)]
    pub kind: ConnectionKind,
    /// Interior polyline points of a water route, unmatched
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "points_as_pairs")]
    pub midpoints: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

fn points_as_pairs<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(points.iter().map(|p| [p.x, p.y]))
}

/// A connection group whose children share at most one style class
#[derive(Debug)]
pub struct ClassedGroup<'a> {
    pub group: &'a RawGroup,
    /// `None` when no child carries a class; such a group is always edges
    pub class: Option<String>,
}

/// Connection groups in document order plus the class chosen for water
#[derive(Debug, Default)]
pub struct ConnectionPlan<'a> {
    pub groups: Vec<ClassedGroup<'a>>,
    pub water_class: Option<String>,
}

impl ConnectionPlan<'_> {
    pub fn kind_of(&self, class: Option<&str>) -> ConnectionKind {
        if class.is_some() && self.water_class.as_deref() == class {
            ConnectionKind::Water
        } else {
            ConnectionKind::Edge
        }
    }
}

/// Assign each connection group its single style class and pick the water class.
///
/// Groups without any class hold edges; groups mixing classes are skipped
/// with a diagnostic. Water needs at least two classes in use: among those
/// with a declared stroke width the widest is water (first seen wins a
/// tie), and every other class is an edge class.
pub fn classify_connections<'a>(
    groups: &[&'a RawGroup],
    styles: &StyleMap,
    report: &mut CompileReport,
) -> ConnectionPlan<'a> {
    let mut plan = ConnectionPlan::default();
    let mut classes_in_use: Vec<&str> = Vec::new();

    for &group in groups {
        let mut classes: Vec<&str> = Vec::new();
        for class in group.children.iter().filter_map(RawNode::connection_class) {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }

        match classes.as_slice() {
            [] => {
                tracing::debug!("Connection group {} has no style class; treated as edges", group.index);
                plan.groups.push(ClassedGroup { group, class: None });
            }
            [class] => {
                if !classes_in_use.contains(class) {
                    classes_in_use.push(*class);
                }
                plan.groups.push(ClassedGroup {
                    group,
                    class: Some(class.to_string()),
                });
            }
            _ => report.record(Diagnostic::AmbiguousGroupStyle {
                group: group.index,
                classes: classes.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }

    let mut water: Option<(&str, f64)> = None;
    let candidates: &[&str] = if classes_in_use.len() > 1 { &classes_in_use } else { &[] };
    for class in candidates {
        if let Some(&width) = styles.get(*class) {
            if water.map_or(true, |(_, widest)| width > widest) {
                water = Some((*class, width));
            }
        }
    }

    plan.water_class = water.map(|(class, _)| class.to_string());
    if plan.water_class.is_none() {
        report.record(Diagnostic::MissingStyleDefinition);
    }

    plan
}

/// Resolve one connection child against the territory centers.
///
/// Returns `None` for children that are not lines or polylines.
pub fn resolve_connection(
    node: &RawNode,
    kind: ConnectionKind,
    group: usize,
    centers: &CenterIndex,
    precision: u32,
) -> Option<Result<Connection, Diagnostic>> {
    let (start, end, midpoints, tension) = match node {
        RawNode::Line(line) => match line.endpoints {
            Some((start, end)) => (start, end, Vec::new(), None),
            None => {
                return Some(Err(Diagnostic::MalformedConnection {
                    group,
                    reason: "line coordinates are not numbers".to_string(),
                }))
            }
        },
        RawNode::Polyline(polyline) => match polyline.points.as_slice() {
            [start, interior @ .., end] => {
                let (midpoints, tension) = match kind {
                    ConnectionKind::Water => (
                        interior.iter().map(|p| round_point(*p, precision)).collect(),
                        polyline.tension,
                    ),
                    ConnectionKind::Edge => (Vec::new(), None),
                };
                (*start, *end, midpoints, tension)
            }
            points => {
                return Some(Err(Diagnostic::MalformedConnection {
                    group,
                    reason: format!("polyline has {} point(s), needs at least 2", points.len()),
                }))
            }
        },
        _ => return None,
    };

    let unmatched = |point: Point| Diagnostic::UnmatchedConnectionEndpoint {
        point,
        tolerance: centers.tolerance(),
    };
    let result = match (centers.nearest(start), centers.nearest(end)) {
        (Some(from), Some(to)) => Ok(Connection {
            from,
            to,
            kind,
            midpoints,
            tension,
        }),
        (None, _) => Err(unmatched(start)),
        (_, None) => Err(unmatched(end)),
    };
    Some(result)
}
