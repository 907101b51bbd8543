//! Region aggregation: contiguous id runs sharing one style class

use crate::core::error::Diagnostic;
use crate::core::types::TerritoryId;
use ahash::AHashSet;
use serde::Serialize;

/// Inclusive id range of one same-class run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    #[serde(rename = "a")]
    pub start: TerritoryId,
    #[serde(rename = "b")]
    pub end: TerritoryId,
}

/// A maximal run of consecutive entries with equal class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRun<'a> {
    pub class: Option<&'a str>,
    pub start: TerritoryId,
    pub end: TerritoryId,
}

/// Split entries (sorted by id) into maximal runs of equal adjacent class
pub fn class_runs(entries: &[(TerritoryId, Option<String>)]) -> Vec<ClassRun<'_>> {
    let mut runs: Vec<ClassRun<'_>> = Vec::new();
    for (id, class) in entries {
        let class = class.as_deref();
        if let Some(run) = runs.last_mut().filter(|run| run.class == class) {
            run.end = *id;
            continue;
        }
        runs.push(ClassRun {
            class,
            start: *id,
            end: *id,
        });
    }
    runs
}

/// Turn territory classes into regions.
///
/// Every class must form exactly one run. Otherwise no regions are
/// produced at all and the run sequence is reported.
pub fn aggregate_regions(mut entries: Vec<(TerritoryId, Option<String>)>) -> Result<Vec<Region>, Diagnostic> {
    entries.sort_by_key(|(id, _)| *id);
    let runs = class_runs(&entries);

    let distinct: AHashSet<Option<&str>> = runs.iter().map(|run| run.class).collect();
    if distinct.len() != runs.len() {
        return Err(Diagnostic::NonContiguousRegionClasses {
            sequence: runs.iter().map(|run| run.class.map(str::to_string)).collect(),
        });
    }

    Ok(runs
        .into_iter()
        .map(|run| Region {
            start: run.start,
            end: run.end,
        })
        .collect())
}
