//! User repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User, Username};

/// Persistence for the `User` aggregate.
///
/// # Contract
///
/// - `insert` fails with `EmailTaken` or `UsernameTaken` when a unique
///   column collides
/// - `update` fails with `UserNotFound` when the user does not exist
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;

    async fn username_exists(&self, username: &Username) -> Result<bool, DomainError>;
}
