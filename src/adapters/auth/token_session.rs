//! `SessionValidator` backed by the token service and the user store.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::auth::TokenKind;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{SessionValidator, TokenService, UserRepository};

/// Verifies an access token, then loads the account it names.
pub struct TokenSessionValidator {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl TokenSessionValidator {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl SessionValidator for TokenSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let verified = self.tokens.verify(token, TokenKind::Access)?;

        let user = self
            .users
            .find_by_id(&verified.user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthenticatedUser::new(
            user.id(),
            user.email().as_str(),
            user.username().as_str(),
        ))
    }
}
