//! Provisio Notify — simulated outbound mail.
//!
//! [`FileNotifier`] stands in for a real SMTP or transactional-mail
//! integration: every message is appended to a sent-mail log file and
//! echoed as a tracing line. Delivery failures surface as
//! `ProvisioError::Notification`, which callers treat as soft.

use std::path::PathBuf;

use chrono::Utc;
use provisio_core::error::{ProvisioError, ProvisioResult};
use provisio_core::repository::Notifier;
use tokio::io::AsyncWriteExt;

/// Default sender address.
pub const DEFAULT_FROM: &str = "it-automation@company.com";

/// Notifier that appends formatted messages to a log file.
pub struct FileNotifier {
    log_path: PathBuf,
    from: String,
}

impl FileNotifier {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            from: DEFAULT_FROM.to_string(),
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }
}

impl Notifier for FileNotifier {
    async fn notify(&self, to: &str, subject: &str, body: &str) -> ProvisioResult<()> {
        let entry = format!(
            "[{}] FROM: {} TO: {}\nSUBJECT: {}\nBODY:\n{}\n{}\n",
            Utc::now().to_rfc3339(),
            self.from,
            to,
            subject,
            body,
            "-".repeat(60),
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(|e| ProvisioError::Notification(e.to_string()))?;
        file.write_all(entry.as_bytes())
            .await
            .map_err(|e| ProvisioError::Notification(e.to_string()))?;

        tracing::info!(to, subject, "message queued");
        Ok(())
    }
}
