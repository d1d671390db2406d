//! Batch reconciliation results.

use serde::{Deserialize, Serialize};

/// Aggregate counters for one reconciliation run.
///
/// `errors` covers duplicate emails (once per distinct duplicated
/// address), rows failing validation, and per-row mutation failures.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchResult {
    pub created: u64,
    pub deactivated: u64,
    pub errors: u64,
}

impl std::fmt::Display for BatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} deactivated, {} errors",
            self.created, self.deactivated, self.errors
        )
    }
}

/// The decision taken for one row during reconciliation, forwarded to
/// the audit sink alongside the row it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDecision {
    /// A new directory record was created.
    Created,
    /// An existing record was deactivated.
    Deactivated,
    /// Offboarding row for a username that was never onboarded; a
    /// harmless no-op, not an error.
    SkippedNotFound,
    /// Onboarding row whose derived username already exists; skipped so
    /// a re-upload of an applied file does not error.
    SkippedExisting,
    /// A later occurrence of an email duplicated within the batch;
    /// the first occurrence wins.
    SkippedDuplicate,
    /// The row's mutation failed unexpectedly; counted as an error.
    Failed,
}
