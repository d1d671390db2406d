//! Batch reconciliation.
//!
//! Turns a parsed batch of input rows into an ordered plan of
//! create/deactivate/skip decisions against the directory store, and
//! applies it. Each row's mutation is independent: a failing row is
//! counted and logged, and processing continues with the rest of the
//! batch.

use std::collections::{BTreeSet, HashSet};

use chrono::Utc;
use provisio_core::catalog::DepartmentCatalog;
use provisio_core::models::batch::{BatchResult, RowDecision};
use provisio_core::models::row::InputRow;
use provisio_core::models::user::{DirectoryUser, UserStatus};
use provisio_core::repository::{AuditSink, DirectoryStore, Notifier};

use crate::config::PipelineConfig;
use crate::credentials::{generate_password, username_from_email};
use crate::templates;
use crate::validator;

/// Reconciles one batch of input rows against the directory store.
///
/// Generic over the store, notifier, and audit sink so the pipeline
/// has no dependency on any concrete backend.
pub struct Reconciler<'a, D, N, A>
where
    D: DirectoryStore,
    N: Notifier,
    A: AuditSink,
{
    store: &'a D,
    notifier: &'a N,
    audit: &'a A,
    catalog: &'a DepartmentCatalog,
    config: &'a PipelineConfig,
}

impl<'a, D, N, A> Reconciler<'a, D, N, A>
where
    D: DirectoryStore,
    N: Notifier,
    A: AuditSink,
{
    pub fn new(
        store: &'a D,
        notifier: &'a N,
        audit: &'a A,
        catalog: &'a DepartmentCatalog,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            audit,
            catalog,
            config,
        }
    }

    /// Process a full batch. `source` labels the input (usually the
    /// uploaded file name) in reports and logs.
    ///
    /// Returns the aggregate counters; `errors` is the sum of distinct
    /// duplicated addresses, rows failing validation, and per-row
    /// mutation failures.
    pub async fn reconcile(&self, rows: &[InputRow], source: &str) -> BatchResult {
        let mut result = BatchResult::default();

        // Pass 1: whole-batch duplicate detection, before any mutation.
        // Counted once per distinct duplicated address, not once per
        // occurrence.
        let duplicates = duplicate_emails(rows);
        for address in &duplicates {
            self.record_error("validation", &format!("Duplicate email: {address}"), None)
                .await;
        }
        result.errors += duplicates.len() as u64;

        // Pass 2: per-row validation, independent of the duplicate
        // pass. Invalid rows are counted and excluded from mutation but
        // never halt the batch.
        let mut valid_rows = Vec::new();
        for row in rows {
            let outcome = validator::validate(row, self.catalog);
            if outcome.valid() {
                valid_rows.push(row);
            } else {
                result.errors += 1;
                self.record_error(
                    "validation",
                    &outcome.errors.join("; "),
                    Some(&raw_row(row)),
                )
                .await;
            }
        }
        tracing::info!(
            source,
            valid = valid_rows.len(),
            errors = result.errors,
            "validation complete"
        );

        if result.errors > 0 {
            self.send_validation_report(source, valid_rows.len(), result.errors)
                .await;
        }

        // Pass 3: ordered per-row mutation. Each lookup runs against
        // current store state, so a row can see a user created earlier
        // in the same batch.
        let mut processed_emails: HashSet<String> = HashSet::new();
        for row in valid_rows {
            let email_key = row.email.trim().to_lowercase();
            let username = username_from_email(row.email.trim());

            // First occurrence of a duplicated address wins; later
            // ones were already counted in pass 1.
            if !processed_emails.insert(email_key) {
                self.observe(row, &username, RowDecision::SkippedDuplicate, "duplicate_email")
                    .await;
                continue;
            }

            let Some(status) = UserStatus::parse(&row.status) else {
                continue; // excluded by validation
            };

            match status {
                UserStatus::Inactive => {
                    self.offboard_row(row, &username, &mut result).await;
                }
                UserStatus::Active => {
                    self.onboard_row(row, &username, &mut result).await;
                }
            }
        }

        self.send_summary(&result).await;
        tracing::info!(source, %result, "batch reconciled");
        result
    }

    /// Offboarding: deactivate when present; a distinct no-op when the
    /// user was never onboarded.
    async fn offboard_row(&self, row: &InputRow, username: &str, result: &mut BatchResult) {
        let detail = format!("dept={} role={}", row.department.trim(), row.role.trim());
        match self.store.get(username).await {
            Ok(Some(_)) => match self.store.deactivate(username).await {
                Ok(()) => {
                    result.deactivated += 1;
                    self.observe(row, username, RowDecision::Deactivated, &detail)
                        .await;
                }
                Err(e) => {
                    result.errors += 1;
                    self.observe(row, username, RowDecision::Failed, &e.to_string())
                        .await;
                }
            },
            Ok(None) => {
                self.observe(row, username, RowDecision::SkippedNotFound, "user_not_found")
                    .await;
            }
            Err(e) => {
                result.errors += 1;
                self.observe(row, username, RowDecision::Failed, &e.to_string())
                    .await;
            }
        }
    }

    /// Onboarding: create with catalog-derived access unless the
    /// username already exists, then attempt the welcome notification.
    async fn onboard_row(&self, row: &InputRow, username: &str, result: &mut BatchResult) {
        match self.store.get(username).await {
            Ok(Some(_)) => {
                self.observe(row, username, RowDecision::SkippedExisting, "username_exists")
                    .await;
                return;
            }
            Ok(None) => {}
            Err(e) => {
                result.errors += 1;
                self.observe(row, username, RowDecision::Failed, &e.to_string())
                    .await;
                return;
            }
        }

        let department = row.department.trim();
        let role = row.role.trim();
        let access = self.catalog.resolve(department, UserStatus::Active);
        let password = generate_password(self.config.password_length);

        let user = DirectoryUser {
            username: username.to_string(),
            name: row.name.trim().to_string(),
            email: row.email.trim().to_string(),
            department: department.to_string(),
            role: role.to_string(),
            organizational_unit: access.organizational_unit,
            groups: access.groups,
            permissions: access.permissions,
            status: UserStatus::Active,
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.create(user).await {
            result.errors += 1;
            self.observe(row, username, RowDecision::Failed, &e.to_string())
                .await;
            return;
        }

        result.created += 1;
        let detail = format!("dept={department} role={role}");
        self.observe(row, username, RowDecision::Created, &detail)
            .await;

        // The account exists even if the welcome message does not
        // arrive: delivery failure is logged, not counted.
        let body = templates::welcome_body(row.name.trim(), username, &password, department, role);
        match self
            .notifier
            .notify(row.email.trim(), templates::WELCOME_SUBJECT, &body)
            .await
        {
            Ok(()) => {
                self.record_event("email_sent", Some(username), &format!("to={}", row.email.trim()))
                    .await;
            }
            Err(e) => {
                self.record_error("email", &e.to_string(), Some(&raw_row(row)))
                    .await;
            }
        }
    }

    /// Forward one `(row, decision, detail)` observation to the audit
    /// sink.
    async fn observe(&self, row: &InputRow, username: &str, decision: RowDecision, detail: &str) {
        match decision {
            RowDecision::Created => {
                self.record_event("create_user", Some(username), detail).await;
            }
            RowDecision::Deactivated => {
                self.record_event("deactivate_user", Some(username), detail)
                    .await;
            }
            RowDecision::SkippedNotFound => {
                self.record_event("deactivate_user_skip", Some(username), detail)
                    .await;
            }
            RowDecision::SkippedExisting => {
                self.record_event("create_user_skip", Some(username), detail)
                    .await;
            }
            RowDecision::SkippedDuplicate => {
                self.record_event("skip_duplicate_row", Some(username), detail)
                    .await;
            }
            RowDecision::Failed => {
                self.record_error("reconcile", detail, Some(&raw_row(row)))
                    .await;
            }
        }
    }

    async fn send_validation_report(&self, source: &str, valid_count: usize, error_count: u64) {
        let subject = templates::validation_report_subject(error_count, source);
        let body = templates::validation_report_body(source, valid_count, error_count, Utc::now());
        match self
            .notifier
            .notify(&self.config.admin_recipient, &subject, &body)
            .await
        {
            Ok(()) => {
                self.record_event(
                    "admin_error_notification",
                    None,
                    &format!("errors={error_count} file={source}"),
                )
                .await;
            }
            Err(e) => {
                self.record_error("admin_notification", &e.to_string(), None)
                    .await;
            }
        }
    }

    /// One summary per fixed operational recipient; failures are
    /// logged but never counted among the row errors.
    async fn send_summary(&self, result: &BatchResult) {
        let subject = templates::summary_subject(result);
        let body = templates::summary_body(result, Utc::now());
        let mut delivered = true;
        for recipient in &self.config.summary_recipients {
            if let Err(e) = self.notifier.notify(recipient, &subject, &body).await {
                delivered = false;
                self.record_error("summary_email", &e.to_string(), None).await;
            }
        }
        if delivered {
            let [hr, it] = &self.config.summary_recipients;
            self.record_event("summary_email_sent", None, &format!("to={hr},{it}"))
                .await;
        }
    }

    /// Audit appends are fire-and-forget: a failed append is logged
    /// and never escalated.
    async fn record_event(&self, action: &str, username: Option<&str>, details: &str) {
        if let Err(e) = self.audit.log_event(action, username, details).await {
            tracing::warn!(action, error = %e, "audit event append failed");
        }
    }

    async fn record_error(&self, source: &str, message: &str, row_data: Option<&str>) {
        if let Err(e) = self.audit.log_error(source, message, row_data).await {
            tracing::warn!(source, error = %e, "audit error append failed");
        }
    }
}

/// Distinct addresses appearing more than once in the batch,
/// case-insensitive, blanks ignored (they fail validation instead).
fn duplicate_emails(rows: &[InputRow]) -> BTreeSet<String> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for row in rows {
        let email = row.email.trim().to_lowercase();
        if email.is_empty() {
            continue;
        }
        if !seen.insert(email.clone()) {
            duplicates.insert(email);
        }
    }
    duplicates
}

fn raw_row(row: &InputRow) -> String {
    serde_json::to_string(row).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str) -> InputRow {
        InputRow {
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn duplicates_counted_once_per_distinct_address() {
        let rows = vec![
            row("a@x.com"),
            row("A@X.com"),
            row("a@x.com"),
            row("b@x.com"),
        ];
        let dups = duplicate_emails(&rows);
        assert_eq!(dups.len(), 1);
        assert!(dups.contains("a@x.com"));
    }

    #[test]
    fn blank_emails_are_not_duplicates() {
        let rows = vec![row(""), row(""), row("  ")];
        assert!(duplicate_emails(&rows).is_empty());
    }
}
