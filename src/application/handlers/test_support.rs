//! Shared fixtures for handler tests.

use crate::adapters::memory::InMemoryStore;
use crate::domain::foundation::{CommandMetadata, PostId, UserId};
use crate::domain::post::Post;
use crate::domain::user::{Email, User, Username};
use crate::ports::{PostRepository, UserRepository};

pub async fn seed_user(store: &InMemoryStore, email: &str) -> User {
    let email = Email::parse(email).unwrap();
    let name = email.local_part().to_string();
    let user = User::register(
        UserId::new(),
        email.clone(),
        Username::derive_from_email(&email),
        name,
        "mock-hash:secret1".to_string(),
    );
    UserRepository::insert(store, &user).await.unwrap();
    user
}

pub async fn seed_post(store: &InMemoryStore, author: &User, content: &str) -> Post {
    let post = Post::new(PostId::new(), author.id(), Some(content), None).unwrap();
    PostRepository::insert(store, &post).await.unwrap();
    post
}

pub fn metadata(user: &User) -> CommandMetadata {
    CommandMetadata::new(user.id()).with_correlation_id("test-correlation")
}
