//! GetProfileHandler - Public profile page query.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::Username;
use crate::ports::{FollowRepository, ProfileReader, ProfileView};

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub username: String,
    /// Signed-in viewer, if any.
    pub viewer: Option<UserId>,
}

/// Profile plus the viewer's relation to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    pub profile: ProfileView,
    pub is_following: bool,
    pub is_own_profile: bool,
}

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileReader>,
    follows: Arc<dyn FollowRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileReader>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { profiles, follows }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<ProfileDetails, DomainError> {
        let not_found =
            || DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", query.username));

        let username = Username::parse(&query.username).map_err(|_| not_found())?;
        let profile = self
            .profiles
            .by_username(&username)
            .await?
            .ok_or_else(not_found)?;

        let (is_following, is_own_profile) = match query.viewer {
            Some(viewer) if viewer == profile.id => (false, true),
            Some(viewer) => (self.follows.is_following(&viewer, &profile.id).await?, false),
            None => (false, false),
        };

        Ok(ProfileDetails {
            profile,
            is_following,
            is_own_profile,
        })
    }
}
