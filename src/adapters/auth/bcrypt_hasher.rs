//! bcrypt implementation of `PasswordHasher`.
//!
//! Hashing runs on the blocking thread pool.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::PasswordHasher;

#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Failed to verify password: {}", e)))
    }
}
