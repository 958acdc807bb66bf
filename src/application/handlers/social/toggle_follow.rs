//! ToggleFollowHandler - Follows or unfollows another user.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventEnvelope, EventId, SerializableDomainEvent,
    UserId,
};
use crate::domain::social::{Follow, UserFollowed, UserUnfollowed};
use crate::ports::{EventPublisher, FollowRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ToggleFollowCommand {
    pub target_id: UserId,
}

pub struct ToggleFollowHandler {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ToggleFollowHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            follows,
            event_publisher,
        }
    }

    /// Returns `true` when the caller now follows the target.
    pub async fn handle(
        &self,
        cmd: ToggleFollowCommand,
        metadata: CommandMetadata,
    ) -> Result<bool, DomainError> {
        let follow = Follow::new(metadata.user_id, cmd.target_id)?;

        if self.users.find_by_id(&cmd.target_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", cmd.target_id),
            ));
        }

        let following = self.follows.toggle(&follow).await?;

        let envelope: EventEnvelope = if following {
            UserFollowed {
                event_id: EventId::new(),
                follower_id: follow.follower_id,
                following_id: follow.following_id,
                followed_at: follow.created_at,
            }
            .to_envelope()?
        } else {
            UserUnfollowed {
                event_id: EventId::new(),
                follower_id: follow.follower_id,
                following_id: follow.following_id,
                unfollowed_at: follow.created_at,
            }
            .to_envelope()?
        };
        let envelope = envelope
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(following)
    }
}
