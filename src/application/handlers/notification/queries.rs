//! Notification inbox handlers.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, NotificationId, UserId};
use crate::ports::{NotificationRepository, NotificationView};

pub struct GetNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl GetNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<NotificationView>, DomainError> {
        self.notifications.list_for(&user_id).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkNotificationsReadCommand {
    pub ids: Vec<NotificationId>,
}

/// Marks the caller's notifications read; ids owned by others are skipped.
pub struct MarkNotificationsReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationsReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        cmd: MarkNotificationsReadCommand,
        metadata: CommandMetadata,
    ) -> Result<u64, DomainError> {
        let marked = self.notifications.mark_read(&metadata.user_id, &cmd.ids).await?;
        tracing::debug!(user_id = %metadata.user_id, marked, "Notifications marked read");
        Ok(marked)
    }
}

pub struct GetUnreadCountHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl GetUnreadCountHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<u64, DomainError> {
        self.notifications.unread_count(&user_id).await
    }
}
