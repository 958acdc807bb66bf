//! HTTP adapter for user discovery and the follow graph.

mod dto;
mod handlers;
mod routes;

pub use dto::{FollowResponse, SuggestionsResponse};
pub use handlers::UserHandlers;
pub use routes::user_routes;
