//! SignOutHandler - Revokes the presented refresh token.

use std::sync::Arc;

use super::token_digest;
use crate::ports::RefreshTokenStore;

#[derive(Debug, Clone, Default)]
pub struct SignOutCommand {
    pub refresh_token: Option<String>,
}

/// Sign-out always succeeds; the caller clears cookies regardless.
pub struct SignOutHandler {
    store: Arc<dyn RefreshTokenStore>,
}

impl SignOutHandler {
    pub fn new(store: Arc<dyn RefreshTokenStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SignOutCommand) {
        let Some(token) = cmd.refresh_token.filter(|t| !t.is_empty()) else {
            return;
        };

        match self.store.revoke(&token_digest(&token)).await {
            Ok(revoked) => tracing::debug!(revoked, "Refresh token released"),
            Err(e) => tracing::warn!(error = %e, "Failed to revoke refresh token on sign-out"),
        }
    }
}
