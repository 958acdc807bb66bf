//! HTTP handlers for the notification inbox.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{CorrelationId, RequireAuth};
use crate::adapters::http::AppDependencies;
use crate::application::handlers::notification::{
    GetNotificationsHandler, GetUnreadCountHandler, MarkNotificationsReadCommand,
    MarkNotificationsReadHandler,
};
use crate::domain::foundation::CommandMetadata;

use super::dto::{MarkReadRequest, MarkReadResponse, NotificationListResponse, UnreadCountResponse};

#[derive(Clone)]
pub struct NotificationHandlers {
    list_handler: Arc<GetNotificationsHandler>,
    unread_handler: Arc<GetUnreadCountHandler>,
    mark_read_handler: Arc<MarkNotificationsReadHandler>,
}

impl NotificationHandlers {
    pub fn new(deps: &AppDependencies) -> Self {
        Self {
            list_handler: Arc::new(GetNotificationsHandler::new(deps.notifications.clone())),
            unread_handler: Arc::new(GetUnreadCountHandler::new(deps.notifications.clone())),
            mark_read_handler: Arc::new(MarkNotificationsReadHandler::new(
                deps.notifications.clone(),
            )),
        }
    }
}

/// GET /api/notifications
pub async fn list_notifications(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<NotificationListResponse>> {
    let notifications = handlers.list_handler.handle(user.id).await?;
    Ok(Json(NotificationListResponse { notifications }))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<UnreadCountResponse>> {
    let count = handlers.unread_handler.handle(user.id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// POST /api/notifications/read - Mark the given notifications read
pub async fn mark_read(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiJson(req): ApiJson<MarkReadRequest>,
) -> ApiResult<Json<MarkReadResponse>> {
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);
    let marked = handlers
        .mark_read_handler
        .handle(MarkNotificationsReadCommand { ids: req.ids }, metadata)
        .await?;
    Ok(Json(MarkReadResponse { marked }))
}
