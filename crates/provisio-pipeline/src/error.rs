//! Pipeline error types.

use provisio_core::error::ProvisioError;
use thiserror::Error;

/// Errors raised while loading an input file, before any row is
/// processed. Row-level problems never surface here; they become
/// counters and audit entries instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file is empty")]
    EmptyInput,

    #[error("failed to read input headers: {0}")]
    Header(String),
}

impl From<PipelineError> for ProvisioError {
    fn from(err: PipelineError) -> Self {
        ProvisioError::Validation {
            message: err.to_string(),
        }
    }
}
