//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the Socialite domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod image_url;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, FieldErrors, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CommentId, NotificationId, PostId, UserId};
pub use image_url::ImageUrl;
pub use timestamp::Timestamp;
