//! Follow repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::social::Follow;

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Removes the edge if present, otherwise stores it.
    ///
    /// Returns `true` when the follower now follows the target.
    async fn toggle(&self, follow: &Follow) -> Result<bool, DomainError>;

    async fn is_following(
        &self,
        follower_id: &UserId,
        following_id: &UserId,
    ) -> Result<bool, DomainError>;
}
