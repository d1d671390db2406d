//! In-app notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An in-app notification shown in the employee portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub sender_username: String,
    pub recipient_email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    pub sender_username: String,
    pub recipient_email: String,
    pub subject: String,
    pub message: String,
}
