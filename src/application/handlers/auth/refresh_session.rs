//! RefreshSessionHandler - Exchanges a refresh token for a new pair.
//!
//! The presented token is revoked, so every refresh token works once.

use std::sync::Arc;

use super::{token_digest, SessionIssuer};
use crate::domain::auth::{TokenKind, TokenPair};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct RefreshSessionResult {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct RefreshSessionHandler {
    users: Arc<dyn UserRepository>,
    sessions: SessionIssuer,
}

impl RefreshSessionHandler {
    pub fn new(users: Arc<dyn UserRepository>, sessions: SessionIssuer) -> Self {
        Self { users, sessions }
    }

    pub async fn handle(
        &self,
        cmd: RefreshSessionCommand,
    ) -> Result<RefreshSessionResult, DomainError> {
        let verified = self
            .sessions
            .tokens()
            .verify(&cmd.refresh_token, TokenKind::Refresh)?;

        let digest = token_digest(&cmd.refresh_token);
        let active = self
            .sessions
            .store()
            .find(&digest)
            .await?
            .filter(|record| record.user_id == verified.user_id)
            .map(|record| record.is_active(Timestamp::now()))
            .unwrap_or(false);
        if !active {
            tracing::debug!(user_id = %verified.user_id, "Refresh token not active");
            return Err(unauthorized());
        }

        // A concurrent refresh may have won the race.
        if !self.sessions.store().revoke(&digest).await? {
            return Err(unauthorized());
        }

        let user = self
            .users
            .find_by_id(&verified.user_id)
            .await?
            .ok_or_else(unauthorized)?;

        let tokens = self.sessions.issue(&user.id()).await?;
        tracing::debug!(user_id = %user.id(), "Session refreshed");

        Ok(RefreshSessionResult { user, tokens })
    }
}

fn unauthorized() -> DomainError {
    DomainError::new(ErrorCode::Unauthorized, "Session expired, please sign in again")
}
