//! Shared dependencies every HTTP area builds its handlers from.

use std::sync::Arc;

use sqlx::PgPool;

use super::cookies::CookieSettings;
use crate::adapters::auth::TokenSessionValidator;
use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresFollowRepository, PostgresNotificationRepository, PostgresPostReader,
    PostgresPostRepository, PostgresProfileReader, PostgresRefreshTokenStore,
    PostgresUserRepository,
};
use crate::application::handlers::notification::NotificationProjector;
use crate::ports::{
    EventBus, EventPublisher, FollowRepository, NotificationRepository, PasswordHasher,
    PostReader, PostRepository, ProfileReader, RefreshTokenStore, SessionValidator, TokenService,
    UserRepository,
};

#[derive(Clone)]
pub struct AppDependencies {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileReader>,
    pub posts: Arc<dyn PostRepository>,
    pub post_reader: Arc<dyn PostReader>,
    pub follows: Arc<dyn FollowRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub sessions: Arc<dyn SessionValidator>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub cookies: CookieSettings,
}

impl AppDependencies {
    /// Everything backed by one in-process store.
    pub fn in_memory<B: EventBus + 'static>(
        store: Arc<InMemoryStore>,
        bus: Arc<B>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        cookies: CookieSettings,
    ) -> Self {
        Self::assemble(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            bus,
            hasher,
            tokens,
            cookies,
        )
    }

    /// Everything backed by PostgreSQL.
    pub fn postgres<B: EventBus + 'static>(
        pool: PgPool,
        bus: Arc<B>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        cookies: CookieSettings,
    ) -> Self {
        Self::assemble(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresProfileReader::new(pool.clone())),
            Arc::new(PostgresPostRepository::new(pool.clone())),
            Arc::new(PostgresPostReader::new(pool.clone())),
            Arc::new(PostgresFollowRepository::new(pool.clone())),
            Arc::new(PostgresNotificationRepository::new(pool.clone())),
            Arc::new(PostgresRefreshTokenStore::new(pool)),
            bus,
            hasher,
            tokens,
            cookies,
        )
    }

    /// Wires the session validator and subscribes the notification projector.
    #[allow(clippy::too_many_arguments)]
    fn assemble<B: EventBus + 'static>(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn ProfileReader>,
        posts: Arc<dyn PostRepository>,
        post_reader: Arc<dyn PostReader>,
        follows: Arc<dyn FollowRepository>,
        notifications: Arc<dyn NotificationRepository>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        bus: Arc<B>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        cookies: CookieSettings,
    ) -> Self {
        bus.subscribe_all(
            NotificationProjector::EVENT_TYPES,
            Arc::new(NotificationProjector::new(notifications.clone())),
        );

        let sessions = Arc::new(TokenSessionValidator::new(tokens.clone(), users.clone()));

        Self {
            users,
            profiles,
            posts,
            post_reader,
            follows,
            notifications,
            refresh_tokens,
            hasher,
            tokens,
            sessions,
            event_publisher: bus,
            cookies,
        }
    }
}
