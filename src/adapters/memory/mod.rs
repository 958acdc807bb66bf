//! In-memory implementation of every storage port.
//!
//! One `InMemoryStore` holds all tables behind a single lock, so read-side
//! views can join across users, posts and follows the way SQL would. Rows
//! are kept in insertion order; "newest first" means reverse insertion
//! order.
//!
//! Used by tests and by `--in-memory` local runs.

mod posts;
mod social;
mod users;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::auth::RefreshTokenRecord;
use crate::domain::foundation::{PostId, UserId};
use crate::domain::notification::Notification;
use crate::domain::post::{Comment, Like, Post};
use crate::domain::social::{Follow, ProfileCounts};
use crate::domain::user::{User, UserSummary};

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    follows: Vec<Follow>,
    notifications: Vec<Notification>,
    refresh_tokens: HashMap<String, RefreshTokenRecord>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id() == id)
    }

    fn summary(&self, id: &UserId) -> Option<UserSummary> {
        self.user(id).map(User::summary)
    }

    fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id() == id)
    }

    fn counts(&self, id: &UserId) -> ProfileCounts {
        ProfileCounts {
            followers: self.follows.iter().filter(|f| &f.following_id == id).count() as u64,
            following: self.follows.iter().filter(|f| &f.follower_id == id).count() as u64,
            posts: self.posts.iter().filter(|p| &p.author_id() == id).count() as u64,
        }
    }

    fn is_following(&self, follower_id: &UserId, following_id: &UserId) -> bool {
        self.follows
            .iter()
            .any(|f| &f.follower_id == follower_id && &f.following_id == following_id)
    }
}

/// Shared in-memory tables.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Test Helpers ===

    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.read().posts.len()
    }

    pub fn notification_count(&self) -> usize {
        self.read().notifications.len()
    }
}
