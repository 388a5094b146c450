//! Import report models for CSV imports

use serde::{Deserialize, Serialize};

/// Why an import row was not applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than two columns
    Malformed,
    /// Identifier or name empty after trimming
    EmptyField,
    /// Key already existed and the overwrite prompt was declined
    OverwriteDeclined,
}

/// One skipped row with its 1-based line number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
    pub content: String,
}

/// Report returned after a CSV import; partial success is expected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub overwritten: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
