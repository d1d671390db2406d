//! Employee portal endpoints: OTP login and in-app notifications.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use provisio_core::models::notification::Notification;
use provisio_core::models::user::UserStatus;
use provisio_core::repository::{DirectoryStore, NotificationStore, Notifier};
use provisio_pipeline::templates;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: String,
}

/// `POST /portal/login` — issue a one-time code to an active user's
/// email. The code only ever travels through the notifier.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = input.email.trim().to_lowercase();
    let user = find_active_by_email(&state, &email).await?;

    let code = state.otp.issue(&user.email);
    state
        .notifier
        .notify(&user.email, templates::OTP_SUBJECT, &templates::otp_body(&code))
        .await?;
    tracing::info!(username = %user.username, "portal code issued");

    Ok(Json(LoginResponse {
        status: "code_sent".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub token: String,
}

/// `POST /portal/verify` — exchange a pending code for a portal token.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let token = state
        .otp
        .verify(input.email.trim(), input.code.trim())
        .ok_or_else(|| ApiError::unauthorized("invalid or expired code"))?;
    Ok(Json(VerifyResponse { token }))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

/// `GET /portal/notifications` — the caller's notifications, newest
/// first.
pub async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let email = session_email(&state, &headers)?;
    Ok(Json(state.audit.list_for(&email, query.limit).await?))
}

/// `POST /portal/notifications/{id}/read` — mark one of the caller's
/// notifications read.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let email = session_email(&state, &headers)?;
    if state.audit.mark_read(id, &email).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("notification", &id.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let email = session_email(&state, &headers)?;
    let unread = state.audit.unread_count(&email).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Resolve the portal token carried in `Authorization: Bearer` or
/// `X-Portal-Token`.
fn session_email(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .or_else(|| {
            headers
                .get("x-portal-token")
                .and_then(|v| v.to_str().ok())
        })
        .ok_or_else(|| ApiError::unauthorized("missing portal token"))?;
    state
        .otp
        .session_email(token)
        .ok_or_else(|| ApiError::unauthorized("invalid portal token"))
}

/// Case-insensitive email lookup over the directory. A miss and an
/// inactive account answer the same way so the endpoint does not leak
/// which addresses exist.
async fn find_active_by_email(
    state: &AppState,
    email: &str,
) -> Result<provisio_core::models::user::DirectoryUser, ApiError> {
    let users = state.store.list().await?;
    users
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(email) && u.status == UserStatus::Active)
        .ok_or_else(|| ApiError::unauthorized("unknown email"))
}
