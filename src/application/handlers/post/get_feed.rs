//! Feed queries: the global feed plus per-user authored and liked posts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::Username;
use crate::ports::{PageRequest, PostReader, PostView, UserRepository};

/// Newest-first feed of every post.
pub struct GetFeedHandler {
    reader: Arc<dyn PostReader>,
}

impl GetFeedHandler {
    pub fn new(reader: Arc<dyn PostReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, page: PageRequest) -> Result<Vec<PostView>, DomainError> {
        self.reader.feed(&page).await
    }
}

/// Which of a user's posts to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPostsKind {
    Authored,
    Liked,
}

#[derive(Debug, Clone)]
pub struct GetUserPostsQuery {
    pub username: String,
    pub kind: UserPostsKind,
    pub page: PageRequest,
}

/// Posts written or liked by the user behind a username.
pub struct GetUserPostsHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn PostReader>,
}

impl GetUserPostsHandler {
    pub fn new(users: Arc<dyn UserRepository>, reader: Arc<dyn PostReader>) -> Self {
        Self { users, reader }
    }

    pub async fn handle(&self, query: GetUserPostsQuery) -> Result<Vec<PostView>, DomainError> {
        let not_found =
            || DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", query.username));

        let username = Username::parse(&query.username).map_err(|_| not_found())?;
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(not_found)?;

        match query.kind {
            UserPostsKind::Authored => self.reader.by_author(&user.id(), &query.page).await,
            UserPostsKind::Liked => self.reader.liked_by(&user.id(), &query.page).await,
        }
    }
}
