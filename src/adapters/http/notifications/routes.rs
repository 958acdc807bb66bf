//! HTTP routes for notification endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_notifications, mark_read, unread_count, NotificationHandlers};

/// Routes mounted under `/api/notifications`.
pub fn notification_routes(handlers: NotificationHandlers) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read", post(mark_read))
        .with_state(handlers)
}
