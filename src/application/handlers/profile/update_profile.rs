//! UpdateProfileHandler - Edits the caller's public profile.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventId, SerializableDomainEvent,
};
use crate::domain::user::{ProfileUpdate, ProfileUpdated};
use crate::ports::{EventPublisher, ProfileReader, ProfileView, UserRepository};

/// Blank optional fields clear the stored value. A missing `image` keeps the
/// current avatar; an empty one removes it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileReader>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateProfileHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileReader>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            profiles,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<ProfileView, DomainError> {
        let not_found = || {
            DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", metadata.user_id),
            )
        };

        let update = ProfileUpdate::new(
            &cmd.name,
            cmd.bio.as_deref(),
            cmd.location.as_deref(),
            cmd.website.as_deref(),
            cmd.image.as_deref(),
        )?;

        let mut user = self
            .users
            .find_by_id(&metadata.user_id)
            .await?
            .ok_or_else(not_found)?;
        user.apply_profile_update(update);
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id(), "Profile updated");

        let event = ProfileUpdated {
            event_id: EventId::new(),
            user_id: user.id(),
            updated_at: user.updated_at(),
        };
        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        self.profiles.by_id(&user.id()).await?.ok_or_else(not_found)
    }
}
