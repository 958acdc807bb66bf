//! Post aggregate and its comments and likes.

use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, ImageUrl, PostId, Timestamp, UserId, ValidationError,
};

/// Maximum length for post content.
pub const MAX_POST_LENGTH: usize = 5000;

/// Maximum length for comment content.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// A post in the feed.
///
/// # Invariants
///
/// - `content` is trimmed and at most 5000 characters
/// - at least one of `content` or `image` is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    content: Option<String>,
    image: Option<ImageUrl>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Post {
    /// Create a new post.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is too long, the image URL is invalid,
    ///   or both content and image are missing
    pub fn new(
        id: PostId,
        author_id: UserId,
        content: Option<&str>,
        image: Option<&str>,
    ) -> Result<Self, DomainError> {
        let content = match content.map(str::trim) {
            None | Some("") => None,
            Some(text) => {
                let len = text.chars().count();
                if len > MAX_POST_LENGTH {
                    return Err(
                        ValidationError::length_out_of_range("content", 0, MAX_POST_LENGTH, len)
                            .into(),
                    );
                }
                Some(text.to_string())
            }
        };
        let image = ImageUrl::parse_optional("image", image)?;

        if content.is_none() && image.is_none() {
            return Err(DomainError::validation(
                "content",
                "A post needs some text or an image",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            author_id,
            content,
            image,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a post from persistence (no validation).
    pub fn reconstitute(
        id: PostId,
        author_id: UserId,
        content: Option<String>,
        image: Option<ImageUrl>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            image,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn image(&self) -> Option<&ImageUrl> {
        self.image.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn is_author(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Only the author may delete a post.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the author
    pub fn authorize_delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_author(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the author can delete this post",
            ))
        }
    }
}

/// A comment left on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    post_id: PostId,
    author_id: UserId,
    content: String,
    created_at: Timestamp,
}

impl Comment {
    /// Create a new comment.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank or longer than 2000 characters
    pub fn new(
        id: CommentId,
        post_id: PostId,
        author_id: UserId,
        content: &str,
    ) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::empty_field("content").into());
        }
        let len = content.chars().count();
        if len > MAX_COMMENT_LENGTH {
            return Err(
                ValidationError::length_out_of_range("content", 1, MAX_COMMENT_LENGTH, len).into(),
            );
        }

        Ok(Self {
            id,
            post_id,
            author_id,
            content: content.to_string(),
            created_at: Timestamp::now(),
        })
    }

    pub fn reconstitute(
        id: CommentId,
        post_id: PostId,
        author_id: UserId,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// A user's like on a post. At most one per (user, post).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Like {
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: Timestamp,
}

impl Like {
    pub fn new(user_id: UserId, post_id: PostId) -> Self {
        Self {
            user_id,
            post_id,
            created_at: Timestamp::now(),
        }
    }
}
