//! HTTP adapter for auth endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AccountResponse, RefreshRequest, SessionResponse, SignInRequest, SignUpRequest,
    SIGN_IN_SUCCESS, SIGN_UP_SUCCESS,
};
pub use handlers::AuthHandlers;
pub use routes::auth_routes;
