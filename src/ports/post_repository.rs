//! Post repository port (write side).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PostId};
use crate::domain::post::{Comment, Like, Post};

/// Persistence for posts, their comments and likes.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: &Post) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// Deletes a post along with its likes, comments and notifications.
    async fn delete(&self, id: &PostId) -> Result<(), DomainError>;

    /// Removes the like if present, otherwise adds it.
    async fn toggle_like(&self, like: &Like) -> Result<LikeToggle, DomainError>;

    async fn insert_comment(&self, comment: &Comment) -> Result<(), DomainError>;
}

/// State of a post's likes after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PostRepository) {}
}
