//! GetSuggestionsHandler - "Who to follow" query.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::social::SUGGESTION_LIMIT;
use crate::ports::{ProfileReader, SuggestedUser};

pub struct GetSuggestionsHandler {
    profiles: Arc<dyn ProfileReader>,
}

impl GetSuggestionsHandler {
    pub fn new(profiles: Arc<dyn ProfileReader>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<Vec<SuggestedUser>, DomainError> {
        self.profiles.suggestions(&user_id, SUGGESTION_LIMIT).await
    }
}
