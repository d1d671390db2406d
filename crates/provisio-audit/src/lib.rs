//! Provisio Audit — SQLite-backed audit trail and in-app
//! notification store.
//!
//! This crate provides:
//! - Connection management ([`connect`], [`connect_in_memory`])
//! - Schema initialization ([`run_migrations`])
//! - The [`SqliteAuditSink`] implementation of the `AuditSink` and
//!   `NotificationStore` traits, plus dashboard query helpers.

mod error;
mod schema;
mod sink;

pub use error::AuditDbError;
pub use schema::run_migrations;
pub use sink::SqliteAuditSink;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open (creating if missing) the audit database at `path`.
pub async fn connect(path: &Path) -> Result<SqlitePool, AuditDbError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    tracing::info!(path = %path.display(), "audit database opened");
    Ok(pool)
}

/// Open an in-memory audit database (tests).
///
/// Limited to one connection so every query sees the same database.
pub async fn connect_in_memory() -> Result<SqlitePool, AuditDbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}
