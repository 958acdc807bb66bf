//! Response bodies for the user discovery and follow endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::SuggestedUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub users: Vec<SuggestedUser>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowResponse {
    pub following: bool,
}
