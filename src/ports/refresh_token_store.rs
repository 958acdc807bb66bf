//! Refresh token store port.
//!
//! Keeps a SHA-256 digest of every refresh token handed out so tokens can be
//! rotated and revoked. Raw tokens are never stored.

use async_trait::async_trait;

use crate::domain::auth::RefreshTokenRecord;
use crate::domain::foundation::{DomainError, Timestamp};

#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, record: &RefreshTokenRecord) -> Result<(), DomainError>;

    async fn find(&self, token_digest: &str) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Marks the token revoked. Returns `true` if it was active before.
    async fn revoke(&self, token_digest: &str) -> Result<bool, DomainError>;

    /// Deletes records that can no longer be exchanged: revoked, or expired
    /// at `now`. Returns how many were removed.
    async fn purge_inactive(&self, now: Timestamp) -> Result<u64, DomainError>;
}
