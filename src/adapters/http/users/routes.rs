//! HTTP routes for user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_suggestions, toggle_follow, UserHandlers};

/// Routes mounted under `/api/users`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/suggestions", get(get_suggestions))
        .route("/:user_id/follow", post(toggle_follow))
        .with_state(handlers)
}
