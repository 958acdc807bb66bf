//! HTTP routes for post endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    create_comment, create_post, delete_post, get_feed, toggle_like, PostHandlers,
};

/// Routes mounted under `/api/posts`.
pub fn post_routes(handlers: PostHandlers) -> Router {
    Router::new()
        .route("/", get(get_feed).post(create_post))
        .route("/:post_id", delete(delete_post))
        .route("/:post_id/like", post(toggle_like))
        .route("/:post_id/comments", post(create_comment))
        .with_state(handlers)
}
