//! HTTP adapter for post endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateCommentRequest, CreatePostRequest, PageQuery, PostListResponse, PostResponse};
pub use handlers::PostHandlers;
pub use routes::post_routes;
