//! Social graph module - who follows whom.

mod events;

pub use events::{UserFollowed, UserUnfollowed};

use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Number of suggested accounts returned to a user.
pub const SUGGESTION_LIMIT: usize = 3;

pub const CANNOT_FOLLOW_SELF: &str = "You cannot follow yourself";

/// Directed follow edge. At most one per (follower, following) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follow {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: Timestamp,
}

impl Follow {
    /// Creates a follow edge.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when a user tries to follow themselves
    pub fn new(follower_id: UserId, following_id: UserId) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::validation("user_id", CANNOT_FOLLOW_SELF));
        }
        Ok(Self {
            follower_id,
            following_id,
            created_at: Timestamp::now(),
        })
    }
}

/// Follower, following and post totals shown on profiles and suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileCounts {
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
}
