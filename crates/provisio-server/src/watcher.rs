//! Spreadsheet file watcher.
//!
//! Polls one file's modification time and re-runs the pipeline each
//! time it advances. Polling is deliberate: it works on every
//! filesystem the server might see and the batch cadence makes
//! sub-second latency pointless.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use provisio_pipeline::{loader, Reconciler};

use crate::state::AppState;

/// Run the watch loop until the task is aborted. Missing files and
/// unreadable batches are logged and retried on the next tick.
pub async fn watch_file(state: AppState, path: PathBuf, interval: Duration) {
    tracing::info!(path = %path.display(), interval_secs = interval.as_secs(), "watching for changes");
    let mut last_seen: Option<SystemTime> = None;

    loop {
        tokio::time::sleep(interval).await;

        let modified = match tokio::fs::metadata(&path).await {
            Ok(meta) => match meta.modified() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(error = %e, "modification time unavailable");
                    continue;
                }
            },
            Err(_) => continue, // not created yet
        };

        if last_seen.is_some_and(|seen| modified <= seen) {
            continue;
        }
        let first_pass = last_seen.is_none();
        last_seen = Some(modified);
        // The first observation only establishes a baseline.
        if first_pass {
            continue;
        }

        if let Err(e) = run_batch(&state, &path).await {
            tracing::warn!(error = %e, "watched batch failed");
        }
    }
}

async fn run_batch(
    state: &AppState,
    path: &PathBuf,
) -> Result<(), provisio_core::error::ProvisioError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| provisio_core::error::ProvisioError::Storage(e.to_string()))?;
    let rows = loader::parse_rows(&data)?;

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::info!(source, rows = rows.len(), "watched file changed");

    let reconciler = Reconciler::new(
        state.store.as_ref(),
        state.notifier.as_ref(),
        &state.audit,
        state.catalog.as_ref(),
        state.pipeline.as_ref(),
    );
    let result = reconciler.reconcile(&rows, &source).await;
    tracing::info!(source, %result, "watched batch complete");
    Ok(())
}
