//! Spreadsheet input rows and validation outcomes.
//!
//! An [`InputRow`] carries the raw field values of one parsed
//! spreadsheet line, before any validation. It only exists for the
//! duration of one batch run.

use serde::{Deserialize, Serialize};

/// One parsed spreadsheet line, fields still unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputRow {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub join_date: String,
    pub status: String,
}

/// Pass/fail plus the ordered list of error strings for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}
