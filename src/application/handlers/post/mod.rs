//! Post, like and comment handlers.

mod create_comment;
mod create_post;
mod delete_post;
mod get_feed;
mod toggle_like;

pub use create_comment::{CreateCommentCommand, CreateCommentHandler};
pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use get_feed::{GetFeedHandler, GetUserPostsHandler, GetUserPostsQuery, UserPostsKind};
pub use toggle_like::{ToggleLikeCommand, ToggleLikeHandler};
