//! Notification repository port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommentId, DomainError, NotificationId, PostId, Timestamp, UserId,
};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::user::UserSummary;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Notifications for `recipient_id`, newest first.
    async fn list_for(&self, recipient_id: &UserId) -> Result<Vec<NotificationView>, DomainError>;

    /// Marks the given notifications read. Ids that belong to another user
    /// are ignored. Returns how many rows changed.
    async fn mark_read(
        &self,
        recipient_id: &UserId,
        ids: &[NotificationId],
    ) -> Result<u64, DomainError>;

    async fn unread_count(&self, recipient_id: &UserId) -> Result<u64, DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: Timestamp,
    pub creator: UserSummary,
    pub post: Option<NotificationPost>,
    pub comment: Option<NotificationComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPost {
    pub id: PostId,
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationComment {
    pub id: CommentId,
    pub content: String,
}
