//! ToggleLikeHandler - Likes or unlikes a post.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventEnvelope, EventId, PostId,
    SerializableDomainEvent,
};
use crate::domain::post::{Like, PostLiked, PostUnliked};
use crate::ports::{EventPublisher, LikeToggle, PostRepository};

#[derive(Debug, Clone)]
pub struct ToggleLikeCommand {
    pub post_id: PostId,
}

pub struct ToggleLikeHandler {
    posts: Arc<dyn PostRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ToggleLikeHandler {
    pub fn new(posts: Arc<dyn PostRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            posts,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ToggleLikeCommand,
        metadata: CommandMetadata,
    ) -> Result<LikeToggle, DomainError> {
        let post = self.posts.find_by_id(&cmd.post_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", cmd.post_id))
        })?;

        let like = Like::new(metadata.user_id, post.id());
        let toggle = self.posts.toggle_like(&like).await?;

        let envelope: EventEnvelope = if toggle.liked {
            PostLiked {
                event_id: EventId::new(),
                post_id: post.id(),
                post_author_id: post.author_id(),
                liker_id: metadata.user_id,
                liked_at: like.created_at,
            }
            .to_envelope()?
        } else {
            PostUnliked {
                event_id: EventId::new(),
                post_id: post.id(),
                liker_id: metadata.user_id,
                unliked_at: like.created_at,
            }
            .to_envelope()?
        };
        let envelope = envelope
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(toggle)
    }
}
