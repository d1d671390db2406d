//! Domain models for Provisio.
//!
//! These are the core types shared across all crates.

pub mod audit;
pub mod batch;
pub mod notification;
pub mod row;
pub mod user;

pub use audit::{AuditErrorRecord, AuditEvent};
pub use batch::{BatchResult, RowDecision};
pub use notification::{CreateNotification, Notification};
pub use row::{InputRow, ValidationOutcome};
pub use user::{DirectoryUser, UpdateUser, UserStatus};
