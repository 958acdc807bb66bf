//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a verified
//! access token. They have no dependency on the token format; any
//! `SessionValidator` adapter can populate them.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token verification:
//! let user = AuthenticatedUser::new(user_id, "ada@example.com", "ada");
//! request.extensions_mut().insert(user);
//! ```

use super::{DomainError, ErrorCode, UserId};
use thiserror::Error;

/// Authenticated user extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier (token `sub` claim).
    pub id: UserId,

    /// Account email address.
    pub email: String,

    /// Public handle used in profile URLs.
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            username: username.into(),
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, has the wrong type, or a bad signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The refresh token was revoked or rotated away.
    #[error("Token revoked")]
    TokenRevoked,

    /// Token is valid but the account no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// A backing store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::TokenRevoked
                | AuthError::UserNotFound
        )
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        let code = if err.requires_reauthentication() {
            ErrorCode::Unauthorized
        } else {
            ErrorCode::InternalError
        };
        DomainError::new(code, err.to_string())
    }
}
