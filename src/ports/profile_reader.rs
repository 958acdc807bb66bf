//! Profile reader port (read side).
//!
//! Profile pages and the "who to follow" box need the user's public fields
//! together with follower, following and post totals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::social::ProfileCounts;
use crate::domain::user::{website_href, Username};

#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Public profile by handle. `None` if unknown.
    async fn by_username(&self, username: &Username) -> Result<Option<ProfileView>, DomainError>;

    /// Public profile by id. `None` if unknown.
    async fn by_id(&self, id: &UserId) -> Result<Option<ProfileView>, DomainError>;

    /// Users that are neither `user_id` nor followed by them, newest accounts
    /// first.
    async fn suggestions(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<SuggestedUser>, DomainError>;
}

/// Everything shown on a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub counts: ProfileCounts,
}

impl ProfileView {
    pub fn website_href(&self) -> Option<String> {
        self.website.as_deref().map(website_href)
    }
}

/// Entry in the suggested-users list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedUser {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub image: Option<String>,
    pub counts: ProfileCounts,
}
