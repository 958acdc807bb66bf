//! User aggregate.
//!
//! A user is created by sign-up with a bcrypt password hash already computed
//! by the application layer. The public profile fields are edited through
//! [`ProfileUpdate`].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ImageUrl, Timestamp, UserId};

use super::values::{website_href, Email, ProfileUpdate, Username};

/// User aggregate.
///
/// # Invariants
///
/// - `email` and `username` are unique across users (enforced by storage)
/// - `name` is 1-100 characters
/// - `password_hash` is never exposed outside the auth flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    username: Username,
    name: String,
    password_hash: String,
    bio: Option<String>,
    image: Option<ImageUrl>,
    location: Option<String>,
    website: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Creates a freshly signed-up user with an empty profile.
    pub fn register(
        id: UserId,
        email: Email,
        username: Username,
        name: String,
        password_hash: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            email,
            username,
            name,
            password_hash,
            bio: None,
            image: None,
            location: None,
            website: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Email,
        username: Username,
        name: String,
        password_hash: String,
        bio: Option<String>,
        image: Option<ImageUrl>,
        location: Option<String>,
        website: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            username,
            name,
            password_hash,
            bio,
            image,
            location,
            website,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn image(&self) -> Option<&ImageUrl> {
        self.image.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Website as a link target, with a scheme added when missing.
    pub fn website_href(&self) -> Option<String> {
        self.website.as_deref().map(website_href)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the editable profile fields. The avatar changes only when the
    /// update carries an image decision.
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        self.name = update.name;
        self.bio = update.bio;
        self.location = update.location;
        self.website = update.website;
        if let Some(image) = update.image {
            self.image = image;
        }
        self.updated_at = Timestamp::now();
    }

    /// Compact public view used next to posts, comments and notifications.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.as_str().to_string(),
            image: self.image.as_ref().map(|i| i.as_str().to_string()),
        }
    }
}

/// Author/creator card shown alongside content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub image: Option<String>,
}
