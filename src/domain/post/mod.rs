//! Post module - posts, comments and likes.

mod events;
#[allow(clippy::module_inception)]
mod post;

pub use events::{CommentCreated, PostCreated, PostDeleted, PostLiked, PostUnliked};
pub use post::{Comment, Like, Post, MAX_COMMENT_LENGTH, MAX_POST_LENGTH};
