//! Map compilation: SVG source document to validated map graph
//!
//! `MapCompiler` runs the whole pipeline for one source file: stylesheet
//! scan, group classification, territory building, connection
//! classification and matching, region aggregation, and assembly.

pub mod connection;
pub mod document;
pub mod matcher;
pub mod region;
pub mod report;
pub mod territory;

pub use connection::{Connection, ConnectionKind};
pub use document::{MapDocument, Size};
pub use matcher::CenterIndex;
pub use region::Region;
pub use report::{CompileReport, Tally};
pub use territory::{Territory, TerritoryBuilder};

use crate::core::config::CompilerConfig;
use crate::core::error::{Diagnostic, Result};
use crate::core::types::TerritoryId;
use crate::geometry::round_value;
use crate::source::{classify_groups, parse_styles, SourceDocument};
use ahash::AHashSet;
use std::path::Path;
use std::str::FromStr;

/// Result of compiling one source file
#[derive(Debug, Clone)]
pub struct Compilation {
    /// `None` when the map has no territories or no edges
    pub document: Option<MapDocument>,
    pub report: CompileReport,
}

/// Compiles source documents with one configuration
pub struct MapCompiler<'a> {
    config: &'a CompilerConfig,
}

impl<'a> MapCompiler<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile SVG text
    pub fn compile_str(&self, text: &str) -> Result<Compilation> {
        let source = SourceDocument::parse(text)?;
        Ok(self.compile_document(&source))
    }

    /// Compile an SVG file on disk
    pub fn compile_file(&self, path: &Path) -> Result<Compilation> {
        let content = std::fs::read_to_string(path)?;
        self.compile_str(&content)
    }

    /// Compile an already parsed source document
    pub fn compile_document(&self, source: &SourceDocument) -> Compilation {
        let mut report = CompileReport::default();

        let styles = parse_styles(&source.stylesheets);
        if styles.is_empty() {
            tracing::info!("No stroke-width styles found; this map will not support water connections");
        }

        let split = classify_groups(&source.groups);
        if split.connections.is_empty() {
            tracing::info!("No connection groups found; this map will have no edges or water connections");
        }

        // Territories
        let builder = TerritoryBuilder::new(self.config);
        let mut territories: Vec<Territory> = Vec::with_capacity(split.territories.len());
        let mut seen: AHashSet<TerritoryId> = AHashSet::new();
        report.territories.attempted = split.territories.len();
        for group in &split.territories {
            match builder.build(group) {
                Ok(territory) if seen.insert(territory.id) => territories.push(territory),
                Ok(territory) => report.record(Diagnostic::DuplicateTerritory(territory.id)),
                Err(diagnostic) => report.record(diagnostic),
            }
        }
        report.territories.compiled = territories.len();

        // Connections
        let centers = CenterIndex::new(territories.iter().map(|t| (t.id, t.center)), self.config.tolerance);
        if centers.is_empty() {
            tracing::debug!("No territory centers; every connection endpoint will be unmatched");
        }
        let plan = connection::classify_connections(&split.connections, &styles, &mut report);
        let mut edges: Vec<Connection> = Vec::new();
        let mut water_connections: Vec<Connection> = Vec::new();

        for classed in &plan.groups {
            let kind = plan.kind_of(classed.class.as_deref());
            for child in &classed.group.children {
                let Some(result) = connection::resolve_connection(
                    child,
                    kind,
                    classed.group.index,
                    &centers,
                    self.config.map_precision,
                ) else {
                    continue;
                };

                let (tally, out) = match kind {
                    ConnectionKind::Edge => (&mut report.edges, &mut edges),
                    ConnectionKind::Water => (&mut report.water_connections, &mut water_connections),
                };
                tally.attempted += 1;
                match result {
                    Ok(connection) => {
                        tally.compiled += 1;
                        out.push(connection);
                    }
                    Err(diagnostic) => report.record(diagnostic),
                }
            }
        }

        // Regions
        let entries: Vec<(TerritoryId, Option<String>)> = territories
            .iter()
            .map(|t| (t.id, t.style_class.clone()))
            .collect();
        report.regions.attempted = {
            let mut sorted = entries.clone();
            sorted.sort_by_key(|(id, _)| *id);
            region::class_runs(&sorted).len()
        };
        let regions = region::aggregate_regions(entries).unwrap_or_else(|diagnostic| {
            report.record(diagnostic);
            Vec::new()
        });
        report.regions.compiled = regions.len();

        let size = self.document_size(source.view_box.as_deref(), &mut report);

        tracing::debug!("Compiled {}", report);

        if territories.is_empty() || edges.is_empty() {
            tracing::info!("Map has no territories or no edges; no document produced");
            return Compilation {
                document: None,
                report,
            };
        }

        Compilation {
            document: Some(MapDocument {
                territories,
                edges,
                water_connections,
                size,
                regions,
            }),
            report,
        }
    }

    fn document_size(&self, view_box: Option<&str>, report: &mut CompileReport) -> Size {
        let Some(text) = view_box else {
            report.record(Diagnostic::InvalidBounds("no viewBox declared".into()));
            return Size::default();
        };
        match svgtypes::ViewBox::from_str(text) {
            Ok(vb) => Size {
                width: round_value(vb.w, self.config.size_precision),
                height: round_value(vb.h, self.config.size_precision),
            },
            Err(e) => {
                report.record(Diagnostic::InvalidBounds(format!("'{}': {}", text, e)));
                Size::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point;

    fn compile(svg: &str) -> Compilation {
        let config = CompilerConfig::default();
        MapCompiler::new(&config).compile_str(svg).unwrap()
    }

    const TWO_TERRITORIES: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
  <g><polygon points="0,0 50,0 50,50"/><text>0</text><circle cx="20" cy="20" r="1"/></g>
  <g><polygon points="100,0 150,0 150,50"/><text>1</text><circle cx="120" cy="20" r="1"/></g>
  <g><line class="edge" x1="21" y1="19" x2="118" y2="22"/></g>
</svg>"#;

    #[test]
    fn test_minimal_map() {
        let compilation = compile(TWO_TERRITORIES);
        let doc = compilation.document.unwrap();
        assert_eq!(doc.territories.len(), 2);
        assert_eq!(doc.edges.len(), 1);
        assert_eq!((doc.edges[0].from, doc.edges[0].to), (TerritoryId(0), TerritoryId(1)));
        assert!(doc.water_connections.is_empty());
        assert_eq!(doc.size, Size { width: 200.0, height: 100.0 });
        // both territories unclassed: one run
        assert_eq!(doc.regions.len(), 1);
        assert!(compilation.report.has(|d| *d == Diagnostic::MissingStyleDefinition));
    }

    #[test]
    fn test_duplicate_territory_discarded() {
        let svg = r#"<svg viewBox="0 0 10 10">
  <g><polygon points="0,0 5,0 5,5"/><text>0</text><circle cx="1" cy="1"/></g>
  <g><polygon points="5,5 9,5 9,9"/><text>0</text><circle cx="8" cy="8"/></g>
  <g><line class="e" x1="1" y1="1" x2="8" y2="8"/></g>
</svg>"#;
        let compilation = compile(svg);
        assert_eq!(compilation.report.territories, Tally { attempted: 2, compiled: 1 });
        assert!(compilation
            .report
            .has(|d| *d == Diagnostic::DuplicateTerritory(TerritoryId(0))));
        let doc = compilation.document.unwrap();
        assert_eq!(doc.territories[0].center, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_missing_view_box_defaults_size() {
        let svg = TWO_TERRITORIES.replace(r#" viewBox="0 0 200 100""#, "");
        let compilation = compile(&svg);
        assert_eq!(compilation.document.unwrap().size, Size::default());
        assert!(compilation.report.has(|d| matches!(d, Diagnostic::InvalidBounds(_))));
    }

    #[test]
    fn test_malformed_view_box() {
        let svg = TWO_TERRITORIES.replace("0 0 200 100", "0 0 nope");
        let compilation = compile(&svg);
        assert_eq!(compilation.document.unwrap().size, Size::default());
        assert!(compilation.report.has(|d| matches!(d, Diagnostic::InvalidBounds(_))));
    }

    #[test]
    fn test_no_edges_suppresses_document() {
        let svg = TWO_TERRITORIES.replace(r#"x2="118""#, r#"x2="300""#);
        let compilation = compile(&svg);
        assert!(compilation.document.is_none());
        assert_eq!(compilation.report.edges, Tally { attempted: 1, compiled: 0 });
    }

    #[test]
    fn test_xml_error_propagates() {
        let config = CompilerConfig::default();
        assert!(MapCompiler::new(&config).compile_str("<svg><g>").is_err());
    }
}
