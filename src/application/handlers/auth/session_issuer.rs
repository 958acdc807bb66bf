//! Issues token pairs and records the refresh half.

use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::auth::{RefreshTokenRecord, TokenPair};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{RefreshTokenStore, TokenService};

/// Hex SHA-256 of a raw token. Only digests are stored.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Signs a fresh access/refresh pair and stores the refresh token digest.
#[derive(Clone)]
pub struct SessionIssuer {
    tokens: Arc<dyn TokenService>,
    store: Arc<dyn RefreshTokenStore>,
}

impl SessionIssuer {
    pub fn new(tokens: Arc<dyn TokenService>, store: Arc<dyn RefreshTokenStore>) -> Self {
        Self { tokens, store }
    }

    pub fn tokens(&self) -> &dyn TokenService {
        self.tokens.as_ref()
    }

    pub fn store(&self) -> &dyn RefreshTokenStore {
        self.store.as_ref()
    }

    pub async fn issue(&self, user_id: &UserId) -> Result<TokenPair, DomainError> {
        let pair = self.tokens.issue_pair(user_id)?;

        let record = RefreshTokenRecord::new(
            token_digest(&pair.refresh.token),
            *user_id,
            pair.refresh.expires_at,
        );
        self.store.insert(&record).await?;

        // Housekeeping only; a failed purge never blocks a sign-in.
        match self.store.purge_inactive(Timestamp::now()).await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "Purged inactive refresh tokens"),
            Err(e) => tracing::warn!(error = %e, "Failed to purge refresh tokens"),
        }

        Ok(pair)
    }
}
