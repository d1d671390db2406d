//! Provisio Server — application entry point.

use std::sync::Arc;

use provisio_core::catalog::DepartmentCatalog;
use provisio_notify::FileNotifier;
use provisio_pipeline::config::PipelineConfig;
use provisio_server::auth::{ApiKeyStore, RateLimiter};
use provisio_server::otp::OtpService;
use provisio_server::{build_router, AppState, ServerConfig};
use provisio_store::JsonDirectoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("provisio=info".parse().unwrap()),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(bind = %config.bind_addr, data_dir = %config.data_dir.display(), "starting provisio server");

    if let Err(e) = tokio::fs::create_dir_all(&config.data_dir).await {
        tracing::error!(error = %e, "could not create data directory");
        std::process::exit(1);
    }

    let catalog = DepartmentCatalog::default();
    let store = match JsonDirectoryStore::open(&config.directory_path, catalog.clone()).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "could not open directory store");
            std::process::exit(1);
        }
    };

    let pool = match provisio_audit::connect(&config.audit_db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "could not open audit database");
            std::process::exit(1);
        }
    };
    if let Err(e) = provisio_audit::run_migrations(&pool).await {
        tracing::error!(error = %e, "audit migrations failed");
        std::process::exit(1);
    }

    let state = AppState {
        store,
        audit: provisio_audit::SqliteAuditSink::new(pool),
        notifier: Arc::new(FileNotifier::new(&config.sent_mail_path)),
        catalog: Arc::new(catalog),
        pipeline: Arc::new(PipelineConfig::default()),
        api_keys: Arc::new(ApiKeyStore::new(config.api_keys.clone())),
        rate_limiter: Arc::new(RateLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window,
        )),
        otp: Arc::new(OtpService::new(config.otp_ttl)),
    };

    if let Some(watch_path) = config.watch_path.clone() {
        tokio::spawn(provisio_server::watcher::watch_file(
            state.clone(),
            watch_path,
            config.watch_interval,
        ));
    }

    let app = build_router(state);
    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, bind = %config.bind_addr, "could not bind");
            std::process::exit(1);
        }
    };

    tracing::info!(bind = %config.bind_addr, "listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped unexpectedly");
        std::process::exit(1);
    }
}
