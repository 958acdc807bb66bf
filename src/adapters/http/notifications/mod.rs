//! HTTP adapter for notification endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{MarkReadRequest, MarkReadResponse, NotificationListResponse, UnreadCountResponse};
pub use handlers::NotificationHandlers;
pub use routes::notification_routes;
