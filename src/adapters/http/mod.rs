//! HTTP adapters - REST API implementations.
//!
//! Each area has its own `dto` / `handlers` / `routes` triple; `router`
//! assembles them behind the session and page-guard middleware.

pub mod auth;
pub mod cookies;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod notifications;
pub mod posts;
pub mod profiles;
pub mod router;
mod state;
pub mod users;

pub use cookies::CookieSettings;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use router::{build_router, RouterSettings};
pub use state::AppDependencies;
