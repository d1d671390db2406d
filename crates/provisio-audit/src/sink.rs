//! SQLite implementation of `AuditSink` and `NotificationStore`.

use chrono::{DateTime, Utc};
use provisio_core::error::ProvisioResult;
use provisio_core::models::audit::{AuditErrorRecord, AuditEvent};
use provisio_core::models::notification::{CreateNotification, Notification};
use provisio_core::repository::{AuditSink, NotificationStore};
use sqlx::{Row, SqlitePool};

use crate::error::AuditDbError;

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AuditDbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AuditDbError::Timestamp(format!("{raw}: {e}")))
}

/// SQLite-backed audit sink.
#[derive(Clone)]
pub struct SqliteAuditSink {
    pool: SqlitePool,
}

impl SqliteAuditSink {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Most recent audit events, newest first.
    pub async fn recent_events(&self, limit: u32) -> ProvisioResult<Vec<AuditEvent>> {
        let rows = sqlx::query(
            "SELECT id, event_time, action, username, details \
             FROM audit_log ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AuditDbError::from)?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            events.push(AuditEvent {
                id: row.get("id"),
                event_time: parse_timestamp(&row.get::<String, _>("event_time"))?,
                action: row.get("action"),
                username: row.get("username"),
                details: row.get::<Option<String>, _>("details").unwrap_or_default(),
            });
        }
        Ok(events)
    }

    /// Most recent recorded errors, newest first.
    pub async fn recent_errors(&self, limit: u32) -> ProvisioResult<Vec<AuditErrorRecord>> {
        let rows = sqlx::query(
            "SELECT id, event_time, source, message, row_data \
             FROM errors ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AuditDbError::from)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(AuditErrorRecord {
                id: row.get("id"),
                event_time: parse_timestamp(&row.get::<String, _>("event_time"))?,
                source: row.get("source"),
                message: row.get("message"),
                row_data: row.get("row_data"),
            });
        }
        Ok(records)
    }
}

impl AuditSink for SqliteAuditSink {
    async fn log_event(
        &self,
        action: &str,
        username: Option<&str>,
        details: &str,
    ) -> ProvisioResult<()> {
        sqlx::query(
            "INSERT INTO audit_log (event_time, action, username, details) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(action)
        .bind(username)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(AuditDbError::from)?;
        Ok(())
    }

    async fn log_error(
        &self,
        source: &str,
        message: &str,
        row_data: Option<&str>,
    ) -> ProvisioResult<()> {
        sqlx::query(
            "INSERT INTO errors (event_time, source, message, row_data) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(source)
        .bind(message)
        .bind(row_data)
        .execute(&self.pool)
        .await
        .map_err(AuditDbError::from)?;
        Ok(())
    }
}

impl NotificationStore for SqliteAuditSink {
    async fn create_notification(&self, input: CreateNotification) -> ProvisioResult<i64> {
        let result = sqlx::query(
            "INSERT INTO notifications \
             (created_at, sender_username, recipient_email, subject, message) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(&input.sender_username)
        .bind(&input.recipient_email)
        .bind(&input.subject)
        .bind(&input.message)
        .execute(&self.pool)
        .await
        .map_err(AuditDbError::from)?;
        Ok(result.last_insert_rowid())
    }

    async fn list_for(
        &self,
        recipient_email: &str,
        limit: u32,
    ) -> ProvisioResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, created_at, sender_username, recipient_email, \
                    subject, message, is_read \
             FROM notifications WHERE recipient_email = ?1 \
             ORDER BY created_at DESC LIMIT ?2",
        )
        .bind(recipient_email)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AuditDbError::from)?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in rows {
            notifications.push(Notification {
                id: row.get("id"),
                created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
                sender_username: row.get("sender_username"),
                recipient_email: row.get("recipient_email"),
                subject: row.get("subject"),
                message: row.get("message"),
                is_read: row.get("is_read"),
            });
        }
        Ok(notifications)
    }

    async fn mark_read(&self, id: i64, recipient_email: &str) -> ProvisioResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = ?1 AND recipient_email = ?2",
        )
        .bind(id)
        .bind(recipient_email)
        .execute(&self.pool)
        .await
        .map_err(AuditDbError::from)?;
        Ok(result.rows_affected() > 0)
    }

    async fn unread_count(&self, recipient_email: &str) -> ProvisioResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient_email = ?1 AND is_read = FALSE",
        )
        .bind(recipient_email)
        .fetch_one(&self.pool)
        .await
        .map_err(AuditDbError::from)?;
        Ok(count as u64)
    }
}
