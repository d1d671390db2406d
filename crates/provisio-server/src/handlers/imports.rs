//! Spreadsheet upload endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use provisio_core::models::batch::BatchResult;
use provisio_pipeline::{loader, Reconciler};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/imports` — run the full pipeline over a CSV request
/// body and return the batch counters. The optional `X-File-Name`
/// header labels the batch in reports and the audit trail.
pub async fn import_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BatchResult>, ApiError> {
    let source = headers
        .get("x-file-name")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("upload.csv")
        .to_string();

    let rows = loader::parse_rows(&body).map_err(provisio_core::error::ProvisioError::from)?;
    tracing::info!(source, rows = rows.len(), "import received");

    let reconciler = Reconciler::new(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &state.audit,
        state.catalog.as_ref(),
        state.pipeline.as_ref(),
    );
    let result = reconciler.reconcile(&rows, &source).await;
    Ok(Json(result))
}
