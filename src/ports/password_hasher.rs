//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// One-way password hashing.
///
/// Implementations are expected to be slow on purpose and should not block
/// the async runtime.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `false` for a wrong password. Errors only for a corrupt hash
    /// or an internal failure.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
