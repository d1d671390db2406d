//! Admin user management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use provisio_core::models::user::{DirectoryUser, UpdateUser};
use provisio_core::repository::{AuditSink, DirectoryStore};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectoryUser>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DirectoryUser>, ApiError> {
    state
        .store
        .get(&username)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user", &username))
}

/// Partial update; the store re-derives access fields from the
/// resulting department and status.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<DirectoryUser>, ApiError> {
    let updated = state.store.update(&username, input).await?;
    record_event(&state, "update_user", &username, "api").await;
    Ok(Json(updated))
}

pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<DirectoryUser>, ApiError> {
    state.store.deactivate(&username).await?;
    record_event(&state, "deactivate_user", &username, "api").await;
    let user = state
        .store
        .get(&username)
        .await?
        .ok_or_else(|| ApiError::not_found("user", &username))?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&username).await?;
    record_event(&state, "delete_user", &username, "api").await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_users(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.store.clear_all().await?;
    if let Err(e) = state.audit.log_event("clear_users", None, "api").await {
        tracing::warn!(error = %e, "audit event append failed");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn record_event(state: &AppState, action: &str, username: &str, details: &str) {
    if let Err(e) = state.audit.log_event(action, Some(username), details).await {
        tracing::warn!(action, error = %e, "audit event append failed");
    }
}
