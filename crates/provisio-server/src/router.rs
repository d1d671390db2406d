//! Route table.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::require_api_key;
use crate::handlers::{audit, imports, notifications, portal, users};
use crate::state::AppState;

/// Assemble the full application router. `/api/*` sits behind the
/// API-key guard; the portal authenticates per-request with its own
/// token.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(users::list_users).delete(users::clear_users))
        .route(
            "/users/:username",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/:username/deactivate",
            post(users::deactivate_user),
        )
        .route("/imports", post(imports::import_batch))
        .route("/audit", get(audit::get_audit))
        .route("/notifications", post(notifications::send_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let portal = Router::new()
        .route("/login", post(portal::login))
        .route("/verify", post(portal::verify))
        .route("/notifications", get(portal::list_notifications))
        .route(
            "/notifications/:id/read",
            post(portal::mark_notification_read),
        )
        .route("/notifications/unread-count", get(portal::unread_count));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest("/portal", portal)
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
