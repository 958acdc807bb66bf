//! NotificationProjector - Derives notifications from social activity.
//!
//! Subscribed to likes, comments and follows. Self-directed activity
//! produces nothing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::notification::Notification;
use crate::domain::post::{CommentCreated, PostLiked};
use crate::domain::social::UserFollowed;
use crate::ports::{EventHandler, NotificationRepository};

const POST_LIKED: &str = "post.liked.v1";
const COMMENT_CREATED: &str = "comment.created.v1";
const USER_FOLLOWED: &str = "user.followed.v1";

pub struct NotificationProjector {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationProjector {
    /// Event types this projector must be subscribed to.
    pub const EVENT_TYPES: &'static [&'static str] = &[POST_LIKED, COMMENT_CREATED, USER_FOLLOWED];

    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    fn project(event: &EventEnvelope) -> Result<Option<Notification>, DomainError> {
        let parse_error =
            |e: serde_json::Error| DomainError::new(ErrorCode::ValidationFailed, e.to_string());

        let notification = match event.event_type.as_str() {
            POST_LIKED => {
                let liked: PostLiked = event.payload_as().map_err(parse_error)?;
                Notification::like(liked.post_author_id, liked.liker_id, liked.post_id, liked.liked_at)
            }
            COMMENT_CREATED => {
                let created: CommentCreated = event.payload_as().map_err(parse_error)?;
                Notification::comment(
                    created.post_author_id,
                    created.author_id,
                    created.post_id,
                    created.comment_id,
                    created.created_at,
                )
            }
            USER_FOLLOWED => {
                let followed: UserFollowed = event.payload_as().map_err(parse_error)?;
                Notification::follow(followed.following_id, followed.follower_id, followed.followed_at)
            }
            _ => None,
        };
        Ok(notification)
    }
}

#[async_trait]
impl EventHandler for NotificationProjector {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(notification) = Self::project(&event)? else {
            return Ok(());
        };

        self.notifications.insert(&notification).await?;
        tracing::debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            kind = %notification.kind,
            "Notification created"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationProjector"
    }
}
