//! Per-file compile statistics and diagnostics

use crate::core::error::Diagnostic;
use std::fmt;

/// Records attempted vs successfully compiled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub attempted: usize,
    pub compiled: usize,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.compiled, self.attempted)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileReport {
    pub territories: Tally,
    pub edges: Tally,
    pub water_connections: Tally,
    pub regions: Tally,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileReport {
    /// Keep a diagnostic and surface it in the log
    pub fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn has(&self, predicate: impl Fn(&Diagnostic) -> bool) -> bool {
        self.diagnostics.iter().any(predicate)
    }
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "territories {}, edges {}, water connections {}, regions {}",
            self.territories, self.edges, self.water_connections, self.regions
        )
    }
}
