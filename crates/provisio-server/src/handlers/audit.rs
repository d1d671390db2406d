//! Read-only audit dashboard endpoint.

use axum::extract::{Query, State};
use axum::Json;
use provisio_core::models::audit::{AuditErrorRecord, AuditEvent};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub events: Vec<AuditEvent>,
    pub errors: Vec<AuditErrorRecord>,
}

/// `GET /api/audit` — recent audit events and recorded errors,
/// newest first.
pub async fn get_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, ApiError> {
    let events = state.audit.recent_events(query.limit).await?;
    let errors = state.audit.recent_errors(query.limit).await?;
    Ok(Json(AuditResponse { events, errors }))
}
