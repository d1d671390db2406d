//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use provisio_core::error::ProvisioError;
use serde::Serialize;

/// Wrapper turning a [`ProvisioError`] into an HTTP response. Handlers
/// return `Result<_, ApiError>` and rely on the `From` conversion.
#[derive(Debug)]
pub struct ApiError(pub ProvisioError);

/// JSON body carried by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<ProvisioError> for ApiError {
    fn from(err: ProvisioError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self(ProvisioError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self(ProvisioError::Validation {
            message: message.into(),
        })
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self(ProvisioError::AuthenticationFailed {
            reason: reason.into(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            ProvisioError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ProvisioError::AlreadyExists { .. } => (StatusCode::CONFLICT, "conflict"),
            ProvisioError::Validation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
            }
            ProvisioError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            ProvisioError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            other => {
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        // Internal details stay in the log, not the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "An unexpected error occurred".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
