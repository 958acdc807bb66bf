//! GetCurrentUserHandler - Query handler for the signed-in account.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<User, DomainError> {
        self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
        })
    }
}
