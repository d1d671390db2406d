//! Store, sink, and notifier trait definitions.
//!
//! All operations are async. The JSON-file directory store is one
//! implementation of [`DirectoryStore`]; a real directory-protocol
//! client would be another satisfying the same contract.

use std::future::Future;

use crate::error::ProvisioResult;
use crate::models::notification::{CreateNotification, Notification};
use crate::models::user::{DirectoryUser, UpdateUser};

/// The authoritative collection of managed user accounts.
///
/// `username` is the unique key; all lookups compare it
/// case-insensitively. Implementations own the records: callers only
/// read snapshots or request mutations, never hold a mutable reference
/// across calls.
pub trait DirectoryStore: Send + Sync {
    /// All records, in stored order.
    fn list(&self) -> impl Future<Output = ProvisioResult<Vec<DirectoryUser>>> + Send;

    /// Look up a single record; `None` when absent.
    fn get(
        &self,
        username: &str,
    ) -> impl Future<Output = ProvisioResult<Option<DirectoryUser>>> + Send;

    /// Insert a new record. Fails with `AlreadyExists` when a record
    /// with the same username (case-insensitive) is present.
    fn create(&self, user: DirectoryUser) -> impl Future<Output = ProvisioResult<()>> + Send;

    /// Merge partial fields into an existing record, then re-derive
    /// `organizational_unit`/`groups`/`permissions` from the resulting
    /// department and status. Fails with `NotFound` when absent.
    fn update(
        &self,
        username: &str,
        input: UpdateUser,
    ) -> impl Future<Output = ProvisioResult<DirectoryUser>> + Send;

    /// Soft delete: set status to inactive and clear
    /// groups/permissions, keeping the record. Fails with `NotFound`
    /// when absent; a no-op when already inactive.
    fn deactivate(&self, username: &str) -> impl Future<Output = ProvisioResult<()>> + Send;

    /// Hard delete: remove the record entirely. Fails with `NotFound`
    /// when absent.
    fn delete(&self, username: &str) -> impl Future<Output = ProvisioResult<()>> + Send;

    /// Empty the entire store.
    fn clear_all(&self) -> impl Future<Output = ProvisioResult<()>> + Send;
}

/// Append-only log of named events and errors.
///
/// Callers treat both operations as fire-and-forget: a failed append
/// is logged and never escalated.
pub trait AuditSink: Send + Sync {
    fn log_event(
        &self,
        action: &str,
        username: Option<&str>,
        details: &str,
    ) -> impl Future<Output = ProvisioResult<()>> + Send;

    fn log_error(
        &self,
        source: &str,
        message: &str,
        row_data: Option<&str>,
    ) -> impl Future<Output = ProvisioResult<()>> + Send;
}

/// Delivers a credential, OTP, or summary message.
///
/// Delivery is best-effort: the reconciler records a failure and
/// continues, with no retry.
pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = ProvisioResult<()>> + Send;
}

/// In-app notification storage for the employee portal.
pub trait NotificationStore: Send + Sync {
    /// Append a notification; returns its id.
    fn create_notification(
        &self,
        input: CreateNotification,
    ) -> impl Future<Output = ProvisioResult<i64>> + Send;

    /// Notifications for one recipient, newest first.
    fn list_for(
        &self,
        recipient_email: &str,
        limit: u32,
    ) -> impl Future<Output = ProvisioResult<Vec<Notification>>> + Send;

    /// Mark one notification read; `false` when no matching row.
    fn mark_read(
        &self,
        id: i64,
        recipient_email: &str,
    ) -> impl Future<Output = ProvisioResult<bool>> + Send;

    fn unread_count(
        &self,
        recipient_email: &str,
    ) -> impl Future<Output = ProvisioResult<u64>> + Send;
}
