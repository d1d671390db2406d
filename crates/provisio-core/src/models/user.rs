//! Directory user domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Parse the spreadsheet status vocabulary, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// One managed account in the directory store.
///
/// `username` is the unique key, compared case-insensitively.
/// `groups`, `permissions`, and `organizational_unit` are always
/// derived from the department catalog and the current status; no
/// caller sets them directly on update. `created_at` is set once at
/// creation and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub organizational_unit: String,
    pub groups: Vec<String>,
    pub permissions: Vec<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial-field update input for a directory user.
///
/// Access fields are absent on purpose: the store re-derives
/// `organizational_unit`/`groups`/`permissions` from the resulting
/// department and status on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub status: Option<UserStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(UserStatus::parse("Active"), Some(UserStatus::Active));
        assert_eq!(UserStatus::parse("INACTIVE"), Some(UserStatus::Inactive));
        assert_eq!(UserStatus::parse(" active "), Some(UserStatus::Active));
        assert_eq!(UserStatus::parse("disabled"), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&UserStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
