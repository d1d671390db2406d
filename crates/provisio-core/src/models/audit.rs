//! Audit trail domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One append-only audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: i64,
    pub event_time: DateTime<Utc>,
    pub action: String,
    pub username: Option<String>,
    pub details: String,
}

/// One recorded error, with the offending row content when available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditErrorRecord {
    pub id: i64,
    pub event_time: DateTime<Utc>,
    pub source: String,
    pub message: String,
    pub row_data: Option<String>,
}
