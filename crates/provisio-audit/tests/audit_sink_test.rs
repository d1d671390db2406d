//! Integration tests for the SQLite audit sink using an in-memory
//! database.

use provisio_audit::{connect_in_memory, run_migrations, SqliteAuditSink};
use provisio_core::models::notification::CreateNotification;
use provisio_core::repository::{AuditSink, NotificationStore};

/// Helper: spin up an in-memory database with the schema applied.
async fn setup() -> SqliteAuditSink {
    let pool = connect_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    SqliteAuditSink::new(pool)
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let sink = setup().await;
    run_migrations(sink.pool()).await.unwrap();
}

#[tokio::test]
async fn log_event_and_fetch_recent() {
    let sink = setup().await;
    sink.log_event("create_user", Some("alice"), "dept=Finance role=Analyst")
        .await
        .unwrap();
    sink.log_event("deactivate_user", Some("bob"), "dept=HR role=Coordinator")
        .await
        .unwrap();
    sink.log_event("summary_email_sent", None, "to=hr-ops,it-automation")
        .await
        .unwrap();

    let events = sink.recent_events(10).await.unwrap();
    assert_eq!(events.len(), 3);
    // Newest first.
    assert_eq!(events[0].action, "summary_email_sent");
    assert_eq!(events[0].username, None);
    assert_eq!(events[2].action, "create_user");
    assert_eq!(events[2].username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn recent_events_respects_limit() {
    let sink = setup().await;
    for i in 0..5 {
        sink.log_event("create_user", Some(&format!("user{i}")), "")
            .await
            .unwrap();
    }
    assert_eq!(sink.recent_events(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn log_error_with_row_data() {
    let sink = setup().await;
    sink.log_error(
        "validation",
        "Missing required field: email",
        Some("{\"name\":\"X\"}"),
    )
    .await
    .unwrap();
    sink.log_error("summary_email", "delivery failed", None)
        .await
        .unwrap();

    let errors = sink.recent_errors(10).await.unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].source, "validation");
    assert_eq!(errors[1].row_data.as_deref(), Some("{\"name\":\"X\"}"));
    assert_eq!(errors[0].row_data, None);
}

#[tokio::test]
async fn notification_lifecycle() {
    let sink = setup().await;
    let id = sink
        .create_notification(CreateNotification {
            sender_username: "admin".into(),
            recipient_email: "alice@company.com".into(),
            subject: "Welcome".into(),
            message: "Your account is ready.".into(),
        })
        .await
        .unwrap();

    assert_eq!(sink.unread_count("alice@company.com").await.unwrap(), 1);

    let listed = sink.list_for("alice@company.com", 50).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].subject, "Welcome");
    assert!(!listed[0].is_read);

    assert!(sink.mark_read(id, "alice@company.com").await.unwrap());
    assert_eq!(sink.unread_count("alice@company.com").await.unwrap(), 0);

    // Marking again still matches the row; count stays at zero.
    assert!(sink.mark_read(id, "alice@company.com").await.unwrap());
    assert_eq!(sink.unread_count("alice@company.com").await.unwrap(), 0);
}

#[tokio::test]
async fn mark_read_requires_matching_recipient() {
    let sink = setup().await;
    let id = sink
        .create_notification(CreateNotification {
            sender_username: "admin".into(),
            recipient_email: "alice@company.com".into(),
            subject: "s".into(),
            message: "m".into(),
        })
        .await
        .unwrap();

    assert!(!sink.mark_read(id, "bob@company.com").await.unwrap());
    assert_eq!(sink.unread_count("alice@company.com").await.unwrap(), 1);
}

#[tokio::test]
async fn notifications_are_scoped_per_recipient() {
    let sink = setup().await;
    for recipient in ["alice@company.com", "bob@company.com", "alice@company.com"] {
        sink.create_notification(CreateNotification {
            sender_username: "system".into(),
            recipient_email: recipient.into(),
            subject: "s".into(),
            message: "m".into(),
        })
        .await
        .unwrap();
    }

    assert_eq!(sink.list_for("alice@company.com", 50).await.unwrap().len(), 2);
    assert_eq!(sink.list_for("bob@company.com", 50).await.unwrap().len(), 1);
    assert_eq!(sink.unread_count("bob@company.com").await.unwrap(), 1);
}
