//! HTTP middleware for axum.
//!
//! - `auth` - Session resolution middleware and extractors
//! - `route_guard` - Page redirects for signed-in and anonymous visitors
//! - `request_id` - Correlation id extractor

pub mod auth;
pub mod request_id;
pub mod route_guard;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
pub use request_id::{CorrelationId, REQUEST_ID_HEADER};
pub use route_guard::{route_guard_middleware, RouteGuardState};
