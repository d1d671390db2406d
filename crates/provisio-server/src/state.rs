//! Shared application state.

use std::sync::Arc;

use provisio_audit::SqliteAuditSink;
use provisio_core::catalog::DepartmentCatalog;
use provisio_notify::FileNotifier;
use provisio_pipeline::config::PipelineConfig;
use provisio_store::JsonDirectoryStore;

use crate::auth::{ApiKeyStore, RateLimiter};
use crate::otp::OtpService;

/// Everything the handlers need, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonDirectoryStore>,
    pub audit: SqliteAuditSink,
    pub notifier: Arc<FileNotifier>,
    pub catalog: Arc<DepartmentCatalog>,
    pub pipeline: Arc<PipelineConfig>,
    pub api_keys: Arc<ApiKeyStore>,
    pub rate_limiter: Arc<RateLimiter>,
    pub otp: Arc<OtpService>,
}
