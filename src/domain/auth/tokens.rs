//! Session token model.
//!
//! Two signed tokens make up a session: a short-lived access token checked
//! on every request, and a long-lived refresh token that is exchanged for a
//! new pair and can be revoked server side.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Which half of the pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Verified contents of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: UserId,
    pub kind: TokenKind,
    /// Unique token id (`jti`).
    pub token_id: String,
    pub expires_at: Timestamp,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub token_id: String,
    pub expires_at: Timestamp,
    /// Lifetime in seconds, used as the cookie `Max-Age`.
    pub ttl_secs: u64,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Stored record of an issued refresh token.
///
/// Only a digest of the token is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token_digest: String,
    pub user_id: UserId,
    pub expires_at: Timestamp,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    pub fn new(token_digest: String, user_id: UserId, expires_at: Timestamp) -> Self {
        Self {
            token_digest,
            user_id,
            expires_at,
            revoked: false,
        }
    }

    /// True while the token is neither revoked nor expired.
    pub fn is_active(&self, now: Timestamp) -> bool {
        !self.revoked && now.is_before(&self.expires_at)
    }
}
