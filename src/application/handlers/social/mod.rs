//! Follow graph handlers.

mod get_suggestions;
mod toggle_follow;

pub use get_suggestions::GetSuggestionsHandler;
pub use toggle_follow::{ToggleFollowCommand, ToggleFollowHandler};
