//! Directory batch compilation
//!
//! Walks an input tree, compiles every source file it finds, and writes
//! each produced document to the mirrored path under the output root.
//! A failure in one file is logged and counted; it never stops the batch.

use crate::compiler::MapCompiler;
use crate::core::config::CompilerConfig;
use crate::core::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome counts for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Source files found
    pub seen: usize,
    /// Documents written
    pub written: usize,
    /// Files that compiled but had no territories or no edges
    pub suppressed: usize,
    /// Files that could not be read, parsed, or written
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} source file(s): {} written, {} suppressed, {} failed",
            self.seen, self.written, self.suppressed, self.failed
        )
    }
}

enum FileOutcome {
    Written,
    Suppressed,
}

pub struct BatchCompiler<'a> {
    config: &'a CompilerConfig,
}

impl<'a> BatchCompiler<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Compile every source file under `input` into `output`.
    ///
    /// Only an unreadable input root is an error.
    pub fn compile_directory(&self, input: &Path, output: &Path) -> Result<BatchSummary> {
        let sources = self.collect_sources(input)?;
        let compiler = MapCompiler::new(self.config);
        let mut summary = BatchSummary {
            seen: sources.len(),
            ..BatchSummary::default()
        };

        for source in &sources {
            let target = self.output_path(input, source, output);
            tracing::info!("Compiling {}", source.display());
            match self.compile_one(&compiler, source, &target) {
                Ok(FileOutcome::Written) => summary.written += 1,
                Ok(FileOutcome::Suppressed) => summary.suppressed += 1,
                Err(e) => {
                    tracing::warn!("Failed to compile {}: {}", source.display(), e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn compile_one(&self, compiler: &MapCompiler<'_>, source: &Path, target: &Path) -> Result<FileOutcome> {
        let compilation = compiler.compile_file(source)?;
        tracing::info!("{}: {}", source.display(), compilation.report);

        let Some(document) = compilation.document else {
            tracing::info!("{}: no output written", source.display());
            return Ok(FileOutcome::Suppressed);
        };
        document.write_to(target)?;
        tracing::debug!("Wrote {}", target.display());
        Ok(FileOutcome::Written)
    }

    /// Source files under `root`, recursively, in sorted path order.
    ///
    /// An unreadable root is an error; unreadable entries below it are
    /// logged and skipped.
    pub fn collect_sources(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = Vec::new();
        self.scan_dir(std::fs::read_dir(root)?, &mut pending, &mut found);

        while let Some(dir) = pending.pop() {
            match std::fs::read_dir(&dir) {
                Ok(entries) => self.scan_dir(entries, &mut pending, &mut found),
                Err(e) => tracing::warn!("Skipping unreadable directory {}: {}", dir.display(), e),
            }
        }

        found.sort();
        Ok(found)
    }

    fn scan_dir(&self, entries: std::fs::ReadDir, pending: &mut Vec<PathBuf>, found: &mut Vec<PathBuf>) {
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };
            if path.is_dir() {
                pending.push(path);
            } else if self.is_source(&path) {
                found.push(path);
            }
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.source_extension))
    }

    /// Mirror `source`'s position under `input` into `output`, swapping the extension
    pub fn output_path(&self, input: &Path, source: &Path, output: &Path) -> PathBuf {
        let relative = source.strip_prefix(input).unwrap_or(source);
        output.join(relative).with_extension(&self.config.output_extension)
    }
}
