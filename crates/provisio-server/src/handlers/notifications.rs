//! Admin in-app notification endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use provisio_core::models::notification::CreateNotification;
use provisio_core::models::user::UserStatus;
use provisio_core::repository::{DirectoryStore, NotificationStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
    pub username: String,
    pub subject: String,
    pub message: String,
    #[serde(default = "default_sender")]
    pub sender: String,
}

fn default_sender() -> String {
    "admin".to_string()
}

#[derive(Debug, Serialize)]
pub struct SendNotificationResponse {
    pub id: i64,
    pub recipient_email: String,
}

/// `POST /api/notifications` — queue an in-app notification for an
/// existing active user; it surfaces in their portal.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(input): Json<SendNotificationRequest>,
) -> Result<(StatusCode, Json<SendNotificationResponse>), ApiError> {
    if input.subject.trim().is_empty() || input.message.trim().is_empty() {
        return Err(ApiError::validation("subject and message are required"));
    }

    let user = state
        .store
        .get(&input.username)
        .await?
        .ok_or_else(|| ApiError::not_found("user", &input.username))?;
    if user.status != UserStatus::Active {
        return Err(ApiError::validation(format!(
            "user is not active: {}",
            user.username
        )));
    }

    let id = state
        .audit
        .create_notification(CreateNotification {
            sender_username: input.sender,
            recipient_email: user.email.clone(),
            subject: input.subject,
            message: input.message,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SendNotificationResponse {
            id,
            recipient_email: user.email,
        }),
    ))
}
