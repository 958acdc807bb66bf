//! Session validation port.
//!
//! HTTP middleware hands the raw access token (from the `access_token`
//! cookie or an `Authorization: Bearer` header) to this port and receives
//! the signed-in user.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and resolves the user they belong to.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature, issuer and expiry
/// - Accept only access tokens, never refresh tokens
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::UserNotFound` when the account no longer exists
/// - Return `AuthError::ServiceUnavailable` for transient storage errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw access token (without any "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
