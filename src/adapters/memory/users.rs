//! Users and profile views.

use async_trait::async_trait;

use super::{InMemoryStore, State};
use crate::domain::auth::EMAIL_ALREADY_EXISTS;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Email, User, Username};
use crate::ports::{ProfileReader, ProfileView, SuggestedUser, UserRepository};

fn profile_view(state: &State, user: &User) -> ProfileView {
    ProfileView {
        id: user.id(),
        name: user.name().to_string(),
        username: user.username().as_str().to_string(),
        bio: user.bio().map(str::to_string),
        image: user.image().map(|i| i.as_str().to_string()),
        location: user.location().map(str::to_string),
        website: user.website().map(str::to_string),
        created_at: user.created_at(),
        counts: state.counts(&user.id()),
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.write();
        if state.users.iter().any(|u| u.email() == user.email()) {
            return Err(DomainError::new(ErrorCode::EmailTaken, EMAIL_ALREADY_EXISTS)
                .with_field_error("email", EMAIL_ALREADY_EXISTS));
        }
        if state.users.iter().any(|u| u.username() == user.username()) {
            return Err(DomainError::new(
                ErrorCode::UsernameTaken,
                format!("Username already taken: {}", user.username()),
            ));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.write();
        match state.users.iter_mut().find(|u| u.id() == user.id()) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.read().user(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self.read().users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, DomainError> {
        Ok(self.read().users.iter().any(|u| u.username() == username))
    }
}

#[async_trait]
impl ProfileReader for InMemoryStore {
    async fn by_username(&self, username: &Username) -> Result<Option<ProfileView>, DomainError> {
        let state = self.read();
        Ok(state
            .users
            .iter()
            .find(|u| u.username() == username)
            .map(|u| profile_view(&state, u)))
    }

    async fn by_id(&self, id: &UserId) -> Result<Option<ProfileView>, DomainError> {
        let state = self.read();
        Ok(state.user(id).map(|u| profile_view(&state, u)))
    }

    async fn suggestions(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<SuggestedUser>, DomainError> {
        let state = self.read();
        Ok(state
            .users
            .iter()
            .rev()
            .filter(|u| &u.id() != user_id && !state.is_following(user_id, &u.id()))
            .take(limit)
            .map(|u| SuggestedUser {
                id: u.id(),
                name: u.name().to_string(),
                username: u.username().as_str().to_string(),
                image: u.image().map(|i| i.as_str().to_string()),
                counts: state.counts(&u.id()),
            })
            .collect())
    }
}
