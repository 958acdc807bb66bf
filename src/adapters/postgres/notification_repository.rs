//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::{column, timestamp, user_summary};
use crate::domain::foundation::{CommentId, DomainError, NotificationId, PostId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{
    NotificationComment, NotificationPost, NotificationRepository, NotificationView,
};

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, creator_id, kind, post_id, comment_id, read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.recipient_id.as_uuid())
        .bind(notification.creator_id.as_uuid())
        .bind(notification.kind.as_str())
        .bind(notification.post_id.map(|id| *id.as_uuid()))
        .bind(notification.comment_id.map(|id| *id.as_uuid()))
        .bind(notification.read)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert notification", e))?;

        Ok(())
    }

    async fn list_for(&self, recipient_id: &UserId) -> Result<Vec<NotificationView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT n.id, n.kind, n.read, n.created_at,
                   c.id AS creator_id, c.name AS creator_name,
                   c.username AS creator_username, c.image AS creator_image,
                   p.id AS post_id, p.content AS post_content, p.image AS post_image,
                   cm.id AS comment_id, cm.content AS comment_content
            FROM notifications n
            JOIN users c ON c.id = n.creator_id
            LEFT JOIN posts p ON p.id = n.post_id
            LEFT JOIN comments cm ON cm.id = n.comment_id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .bind(recipient_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch notifications", e))?;

        rows.iter().map(row_to_view).collect()
    }

    async fn mark_read(
        &self,
        recipient_id: &UserId,
        ids: &[NotificationId],
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE recipient_id = $1 AND id = ANY($2) AND NOT read
            "#,
        )
        .bind(recipient_id.as_uuid())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to mark notifications read", e))?;

        Ok(result.rows_affected())
    }

    async fn unread_count(&self, recipient_id: &UserId) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT read",
        )
        .bind(recipient_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count notifications", e))?;

        Ok(count as u64)
    }
}

fn row_to_view(row: &PgRow) -> Result<NotificationView, DomainError> {
    let kind: String = column(row, "kind")?;
    let post_id: Option<Uuid> = column(row, "post_id")?;
    let comment_id: Option<Uuid> = column(row, "comment_id")?;

    let post = match post_id {
        Some(id) => Some(NotificationPost {
            id: PostId::from_uuid(id),
            content: column(row, "post_content")?,
            image: column(row, "post_image")?,
        }),
        None => None,
    };
    let comment = match comment_id {
        Some(id) => Some(NotificationComment {
            id: CommentId::from_uuid(id),
            content: column(row, "comment_content")?,
        }),
        None => None,
    };

    Ok(NotificationView {
        id: NotificationId::from_uuid(column(row, "id")?),
        kind: kind.parse::<NotificationKind>()?,
        read: column(row, "read")?,
        created_at: timestamp(row, "created_at")?,
        creator: user_summary(row, "creator")?,
        post,
        comment,
    })
}
