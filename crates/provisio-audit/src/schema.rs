//! Schema initialization for the audit database.

use sqlx::SqlitePool;

use crate::error::AuditDbError;

/// Idempotent DDL for the audit trail, error log, and in-app
/// notification tables. The layout matches the historical database so
/// existing files keep working.
const SCHEMA_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS audit_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_time TEXT NOT NULL,
        action TEXT NOT NULL,
        username TEXT,
        details TEXT
    )",
    "CREATE TABLE IF NOT EXISTS errors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_time TEXT NOT NULL,
        source TEXT NOT NULL,
        message TEXT NOT NULL,
        row_data TEXT
    )",
    "CREATE TABLE IF NOT EXISTS notifications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL,
        sender_username TEXT NOT NULL,
        recipient_email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        is_read BOOLEAN DEFAULT FALSE
    )",
];

/// Apply the schema. Safe to run at every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AuditDbError> {
    for statement in SCHEMA_SQL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| AuditDbError::Migration(e.to_string()))?;
    }
    Ok(())
}
