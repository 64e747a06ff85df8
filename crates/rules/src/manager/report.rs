//! Diagnostic view of the alarm table.

use std::fmt;

use serde::Serialize;

/// Snapshot of the alarm table and its space usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmReport {
    pub count: usize,
    pub entries: Vec<ReportEntry>,
    /// Bytes the persisted table occupies.
    pub total: usize,
    /// Bytes left in the reserved region.
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub pattern: String,
    pub length: usize,
}

impl fmt::Display for AlarmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Count: {}", self.count)?;
        for entry in &self.entries {
            writeln!(f, "{}: {} => {}", entry.index, entry.pattern, entry.length)?;
        }
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Available: {}", self.available)
    }
}
