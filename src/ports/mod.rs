//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `UserRepository` / `ProfileReader` - Accounts and profile views
//! - `PostRepository` / `PostReader` - Posts, likes, comments and feeds
//! - `FollowRepository` - Follow graph
//! - `NotificationRepository` - Notification storage and views
//! - `RefreshTokenStore` - Issued refresh token digests
//!
//! ## Auth Ports
//!
//! - `PasswordHasher` - Password hashing
//! - `TokenService` - Token signing and verification
//! - `SessionValidator` - Access token to signed-in user
//!
//! ## Event Ports
//!
//! - `EventPublisher` / `EventSubscriber` / `EventHandler`

mod event_publisher;
mod event_subscriber;
mod follow_repository;
mod notification_repository;
mod password_hasher;
mod post_reader;
mod post_repository;
mod profile_reader;
mod refresh_token_store;
mod session_validator;
mod token_service;
mod user_repository;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use follow_repository::FollowRepository;
pub use notification_repository::{
    NotificationComment, NotificationPost, NotificationRepository, NotificationView,
};
pub use password_hasher::PasswordHasher;
pub use post_reader::{
    CommentView, PageRequest, PostReader, PostView, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT,
};
pub use post_repository::{LikeToggle, PostRepository};
pub use profile_reader::{ProfileReader, ProfileView, SuggestedUser};
pub use refresh_token_store::RefreshTokenStore;
pub use session_validator::SessionValidator;
pub use token_service::TokenService;
pub use user_repository::UserRepository;
