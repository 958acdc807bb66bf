//! HTTP routes for auth endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{me, refresh, sign_in, sign_out, sign_up, AuthHandlers};

/// Routes mounted under `/api/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/refresh", post(refresh))
        .route("/signout", post(sign_out))
        .route("/me", get(me))
        .with_state(handlers)
}
