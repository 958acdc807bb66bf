//! Notification module - pull-only activity notices.
//!
//! Notifications are derived from `post.liked.v1`, `comment.created.v1` and
//! `user.followed.v1` events. A user is never notified about their own
//! activity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, NotificationId, PostId, Timestamp, UserId,
};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "LIKE",
            NotificationKind::Comment => "COMMENT",
            NotificationKind::Follow => "FOLLOW",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(NotificationKind::Like),
            "COMMENT" => Ok(NotificationKind::Comment),
            "FOLLOW" => Ok(NotificationKind::Follow),
            other => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Unknown notification kind: {}", other),
            )),
        }
    }
}

/// A notice delivered to `recipient_id` about something `creator_id` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub creator_id: UserId,
    pub kind: NotificationKind,
    pub post_id: Option<PostId>,
    pub comment_id: Option<CommentId>,
    pub read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    fn build(
        recipient_id: UserId,
        creator_id: UserId,
        kind: NotificationKind,
        post_id: Option<PostId>,
        comment_id: Option<CommentId>,
        created_at: Timestamp,
    ) -> Option<Self> {
        if recipient_id == creator_id {
            return None;
        }
        Some(Self {
            id: NotificationId::new(),
            recipient_id,
            creator_id,
            kind,
            post_id,
            comment_id,
            read: false,
            created_at,
        })
    }

    /// Like on the recipient's post. `None` for self-likes.
    pub fn like(
        recipient_id: UserId,
        creator_id: UserId,
        post_id: PostId,
        at: Timestamp,
    ) -> Option<Self> {
        Self::build(recipient_id, creator_id, NotificationKind::Like, Some(post_id), None, at)
    }

    /// Comment on the recipient's post. `None` for self-comments.
    pub fn comment(
        recipient_id: UserId,
        creator_id: UserId,
        post_id: PostId,
        comment_id: CommentId,
        at: Timestamp,
    ) -> Option<Self> {
        Self::build(
            recipient_id,
            creator_id,
            NotificationKind::Comment,
            Some(post_id),
            Some(comment_id),
            at,
        )
    }

    /// New follower.
    pub fn follow(recipient_id: UserId, creator_id: UserId, at: Timestamp) -> Option<Self> {
        Self::build(recipient_id, creator_id, NotificationKind::Follow, None, None, at)
    }
}
