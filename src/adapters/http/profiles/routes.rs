//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    get_liked_posts, get_profile, get_user_posts, update_profile, ProfileHandlers,
};

/// Routes mounted under `/api`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/profiles/:username", get(get_profile))
        .route("/profiles/:username/posts", get(get_user_posts))
        .route("/profiles/:username/likes", get(get_liked_posts))
        .route("/profile", put(update_profile))
        .with_state(handlers)
}
