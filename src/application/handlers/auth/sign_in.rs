//! SignInHandler - Command handler for password sign-in.

use std::sync::Arc;

use super::SessionIssuer;
use crate::domain::auth::{SignInForm, TokenPair, EMAIL_NOT_REGISTERED, WRONG_PASSWORD};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, UserRepository};

#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignInResult {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignInHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: SessionIssuer,
}

impl SignInHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: SessionIssuer,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignInResult, DomainError> {
        let form = SignInForm::parse(&cmd.email, &cmd.password)?;

        let user = self
            .users
            .find_by_email(&form.email)
            .await?
            .ok_or_else(|| credentials_error(EMAIL_NOT_REGISTERED))?;

        if !self.hasher.verify(&form.password, user.password_hash()).await? {
            tracing::debug!(user_id = %user.id(), "Sign-in rejected: wrong password");
            return Err(credentials_error(WRONG_PASSWORD));
        }

        let tokens = self.sessions.issue(&user.id()).await?;
        tracing::info!(user_id = %user.id(), "User signed in");

        Ok(SignInResult { user, tokens })
    }
}

fn credentials_error(message: &str) -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, message).with_field_error("email", message)
}
