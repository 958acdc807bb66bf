//! Mock authentication adapters for testing.
//!
//! # Example
//!
//! ```ignore
//! use socialite::adapters::auth::MockSessionValidator;
//! use socialite::domain::foundation::{AuthenticatedUser, UserId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", AuthenticatedUser::new(UserId::new(), "ada@example.com", "ada"));
//!
//! assert!(validator.validate("valid-token").await.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, UserId};
use crate::ports::{PasswordHasher, SessionValidator};

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a generated user with the given handle.
    pub fn with_test_user(self, token: impl Into<String>, username: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(),
            format!("{}@test.example.com", username),
            username,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// Reversible stand-in for bcrypt so handler tests run instantly.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPasswordHasher;

const MOCK_HASH_PREFIX: &str = "mock-hash:";

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("{}{}", MOCK_HASH_PREFIX, password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        match hash.strip_prefix(MOCK_HASH_PREFIX) {
            Some(stored) => Ok(stored == password),
            None => Err(DomainError::internal("not a mock hash")),
        }
    }
}
