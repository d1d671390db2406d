//! Store-specific error types and conversions.

use provisio_core::error::ProvisioError;

/// Directory-store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("User not found: {username}")]
    NotFound { username: String },

    #[error("User already exists: {username}")]
    AlreadyExists { username: String },
}

impl From<StoreError> for ProvisioError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { username } => ProvisioError::NotFound {
                entity: "user".into(),
                id: username,
            },
            StoreError::AlreadyExists { username } => ProvisioError::AlreadyExists {
                entity: format!("user '{username}'"),
            },
            other => ProvisioError::Storage(other.to_string()),
        }
    }
}
