//! Error types for the Provisio system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisioError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Audit log error: {0}")]
    Audit(String),

    /// Soft failure: a message could not be delivered. Callers log and
    /// continue; this never aborts a batch.
    #[error("Notification delivery failed: {0}")]
    Notification(String),

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Rate limit exceeded")]
    RateLimited,
}

pub type ProvisioResult<T> = Result<T, ProvisioError>;
