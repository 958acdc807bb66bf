//! Post domain events.
//!
//! - `PostCreated` - New post published
//! - `PostDeleted` - Post removed by its author
//! - `PostLiked` / `PostUnliked` - Like toggled
//! - `CommentCreated` - Comment added to a post
//!
//! `PostLiked` and `CommentCreated` carry the post author so subscribers can
//! notify them without another lookup.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, CommentId, EventId, PostId, Timestamp, UserId};

// ════════════════════════════════════════════════════════════════════════════
// PostCreated
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreated {
    pub event_id: EventId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub created_at: Timestamp,
}

domain_event!(
    PostCreated,
    event_type = "post.created.v1",
    aggregate_id = post_id,
    aggregate_type = "Post",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PostDeleted
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDeleted {
    pub event_id: EventId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    PostDeleted,
    event_type = "post.deleted.v1",
    aggregate_id = post_id,
    aggregate_type = "Post",
    occurred_at = deleted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PostLiked
// ════════════════════════════════════════════════════════════════════════════

/// Published when a user likes a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLiked {
    pub event_id: EventId,
    pub post_id: PostId,
    /// Owner of the liked post (notification recipient).
    pub post_author_id: UserId,
    pub liker_id: UserId,
    pub liked_at: Timestamp,
}

domain_event!(
    PostLiked,
    event_type = "post.liked.v1",
    aggregate_id = post_id,
    aggregate_type = "Post",
    occurred_at = liked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PostUnliked
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUnliked {
    pub event_id: EventId,
    pub post_id: PostId,
    pub liker_id: UserId,
    pub unliked_at: Timestamp,
}

domain_event!(
    PostUnliked,
    event_type = "post.unliked.v1",
    aggregate_id = post_id,
    aggregate_type = "Post",
    occurred_at = unliked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// CommentCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a comment is added to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreated {
    pub event_id: EventId,
    pub comment_id: CommentId,
    pub post_id: PostId,
    /// Owner of the commented post (notification recipient).
    pub post_author_id: UserId,
    pub author_id: UserId,
    pub created_at: Timestamp,
}

domain_event!(
    CommentCreated,
    event_type = "comment.created.v1",
    aggregate_id = post_id,
    aggregate_type = "Post",
    occurred_at = created_at,
    event_id = event_id
);
