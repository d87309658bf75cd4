//! Whole-diff statistics: a pure reduction over parsed file entries.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::file::{FileDiff, FileStatus};

/// Aggregate statistics over a parsed diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub total_files: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
    pub total_changes: usize,
    pub files_by_status: BTreeMap<FileStatus, usize>,
}

/// Reduce per-file statistics into a whole-diff summary
#[must_use]
pub fn summarize(files: &[FileDiff]) -> DiffSummary {
    let mut files_by_status = BTreeMap::new();
    let mut total_additions = 0;
    let mut total_deletions = 0;

    for file in files {
        *files_by_status.entry(file.status).or_insert(0) += 1;
        total_additions += file.additions;
        total_deletions += file.deletions;
    }

    DiffSummary {
        total_files: files.len(),
        total_additions,
        total_deletions,
        total_changes: total_additions + total_deletions,
        files_by_status,
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "files: {}", self.total_files)?;
        writeln!(f, "additions: {}", self.total_additions)?;
        writeln!(f, "deletions: {}", self.total_deletions)?;
        writeln!(f, "changes: {}", self.total_changes)?;
        for (status, count) in &self.files_by_status {
            writeln!(f, "  {status}: {count}")?;
        }
        Ok(())
    }
}
