//! Audit-database error types and conversions.

use provisio_core::error::ProvisioError;

/// Audit-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum AuditDbError {
    #[error("SQLite error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid stored timestamp: {0}")]
    Timestamp(String),
}

impl From<AuditDbError> for ProvisioError {
    fn from(err: AuditDbError) -> Self {
        ProvisioError::Audit(err.to_string())
    }
}
