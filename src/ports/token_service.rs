//! Token issuing and verification port.

use crate::domain::auth::{IssuedToken, TokenKind, TokenPair, VerifiedToken};
use crate::domain::foundation::{AuthError, UserId};

/// Signs and verifies session tokens.
///
/// # Contract
///
/// - `verify` checks signature, issuer, expiry and that the token is of the
///   expected kind
/// - Expired tokens yield `AuthError::TokenExpired`, anything else
///   unacceptable yields `AuthError::InvalidToken`
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: &UserId, kind: TokenKind) -> Result<IssuedToken, AuthError>;

    fn verify(&self, token: &str, expected: TokenKind) -> Result<VerifiedToken, AuthError>;

    fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(user_id, TokenKind::Access)?,
            refresh: self.issue(user_id, TokenKind::Refresh)?,
        })
    }
}
