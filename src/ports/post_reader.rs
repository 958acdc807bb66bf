//! Post reader port (read side / feed queries).
//!
//! Views are denormalized: each post carries its author card, every comment
//! with its author card, and the ids of the users who liked it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, DomainError, PostId, Timestamp, UserId};
use crate::domain::user::UserSummary;

/// Default page size for feeds.
pub const DEFAULT_FEED_LIMIT: u32 = 50;

/// Largest page a caller may request.
pub const MAX_FEED_LIMIT: u32 = 100;

#[async_trait]
pub trait PostReader: Send + Sync {
    /// Single post view. `None` if unknown.
    async fn get(&self, id: &PostId) -> Result<Option<PostView>, DomainError>;

    /// All posts, newest first.
    async fn feed(&self, page: &PageRequest) -> Result<Vec<PostView>, DomainError>;

    /// Posts written by `author_id`, newest first.
    async fn by_author(
        &self,
        author_id: &UserId,
        page: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError>;

    /// Posts liked by `user_id`, newest post first.
    async fn liked_by(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<Vec<PostView>, DomainError>;
}

/// Limit/offset paging, clamped to `MAX_FEED_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub author: UserSummary,
    pub content: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    /// Oldest first.
    pub comments: Vec<CommentView>,
    pub liker_ids: Vec<UserId>,
    pub like_count: u64,
    pub comment_count: u64,
}

impl PostView {
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.liker_ids.contains(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub author: UserSummary,
    pub content: String,
    pub created_at: Timestamp,
}
