//! SVG source ingestion
//!
//! Parses the vector document once into a small tagged model. Element
//! names are inspected here and nowhere else: everything downstream
//! matches on [`RawNode`] variants.

pub mod group;
pub mod style;

pub use group::{classify_groups, GroupKind, GroupSplit};
pub use style::{parse_styles, StyleMap};

use crate::core::error::Result;
use crate::core::types::Point;
use roxmltree::{Node, ParsingOptions};
use svgtypes::PointsParser;

/// Shape carrying a territory outline
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineShape {
    /// `<polygon points="...">`
    Polygon(String),
    /// `<path d="...">`
    Path(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub shape: OutlineShape,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    /// `None` when a coordinate attribute is present but not a number
    pub endpoints: Option<(Point, Point)>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPolyline {
    pub points: Vec<Point>,
    pub class: Option<String>,
    /// Curve tension hint for renderers (`data-tension`)
    pub tension: Option<f64>,
}

/// A direct child element of a group
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Outline(Outline),
    /// `<text>` content, trimmed
    Label(String),
    /// `<circle>` center; `None` if cx/cy are missing or not numbers
    CenterMarker(Option<Point>),
    /// `<rect>` anchor; `None` if x/y are missing or not numbers
    FortificationMarker(Option<Point>),
    Line(RawLine),
    Polyline(RawPolyline),
    /// Any other element (nested groups, decorations)
    Other,
}

/// One `<g>` element with its element children in document order
#[derive(Debug, Clone, PartialEq)]
pub struct RawGroup {
    /// Position among all groups of the document
    pub index: usize,
    pub children: Vec<RawNode>,
}

/// Everything the compiler needs from one source file
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    pub groups: Vec<RawGroup>,
    /// Text of every `<style>` element
    pub stylesheets: Vec<String>,
    /// `viewBox` of the root element, unparsed
    pub view_box: Option<String>,
}

impl SourceDocument {
    /// Parse SVG text
    pub fn parse(text: &str) -> Result<Self> {
        // drawing tools emit DOCTYPE declarations with entity definitions
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        let root = doc.root_element();

        let groups = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "g")
            .enumerate()
            .map(|(index, group)| RawGroup {
                index,
                children: group
                    .children()
                    .filter(|n| n.is_element())
                    .map(RawNode::from_element)
                    .collect(),
            })
            .collect();

        let stylesheets = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "style")
            .map(|n| text_content(&n))
            .filter(|css| !css.trim().is_empty())
            .collect();

        Ok(Self {
            groups,
            stylesheets,
            view_box: root.attribute("viewBox").map(str::to_string),
        })
    }
}

fn text_content(node: &Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn class_of(node: &Node<'_, '_>) -> Option<String> {
    node.attribute("class")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Finite numeric attribute; `NaN` and `inf` spellings count as unreadable
fn number(node: &Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name)?
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
}

/// Required coordinate pair: both attributes must be present numbers
fn point(node: &Node<'_, '_>, x: &str, y: &str) -> Option<Point> {
    Some(Point::new(number(node, x)?, number(node, y)?))
}

/// Line coordinate: absent means 0, present but unreadable means `None`
fn line_coordinate(node: &Node<'_, '_>, name: &str) -> Option<f64> {
    match node.attribute(name) {
        None => Some(0.0),
        Some(value) => value.trim().parse().ok().filter(|v: &f64| v.is_finite()),
    }
}

impl RawNode {
    fn from_element(node: Node<'_, '_>) -> Self {
        match node.tag_name().name() {
            "polygon" => RawNode::Outline(Outline {
                shape: OutlineShape::Polygon(node.attribute("points").unwrap_or_default().to_string()),
                class: class_of(&node),
            }),
            "path" => RawNode::Outline(Outline {
                shape: OutlineShape::Path(node.attribute("d").unwrap_or_default().to_string()),
                class: class_of(&node),
            }),
            "text" => RawNode::Label(text_content(&node).trim().to_string()),
            "circle" => RawNode::CenterMarker(point(&node, "cx", "cy")),
            "rect" => RawNode::FortificationMarker(point(&node, "x", "y")),
            "line" => {
                let coords = (
                    line_coordinate(&node, "x1"),
                    line_coordinate(&node, "y1"),
                    line_coordinate(&node, "x2"),
                    line_coordinate(&node, "y2"),
                );
                let endpoints = match coords {
                    (Some(x1), Some(y1), Some(x2), Some(y2)) => {
                        Some((Point::new(x1, y1), Point::new(x2, y2)))
                    }
                    _ => None,
                };
                RawNode::Line(RawLine {
                    endpoints,
                    class: class_of(&node),
                })
            }
            "polyline" => RawNode::Polyline(RawPolyline {
                points: PointsParser::from(node.attribute("points").unwrap_or_default())
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(x, y)| Point::new(x, y))
                    .collect(),
                class: class_of(&node),
                tension: number(&node, "data-tension"),
            }),
            _ => RawNode::Other,
        }
    }

    /// Style class of a connection child, if this is one
    pub fn connection_class(&self) -> Option<&str> {
        match self {
            RawNode::Line(line) => line.class.as_deref(),
            RawNode::Polyline(polyline) => polyline.class.as_deref(),
            _ => None,
        }
    }
}
