//! CreatePostHandler - Command handler for publishing posts.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, PostId, SerializableDomainEvent,
};
use crate::domain::post::{Post, PostCreated};
use crate::ports::{EventPublisher, PostRepository};

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub content: Option<String>,
    pub image: Option<String>,
}

pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            posts,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePostCommand,
        metadata: CommandMetadata,
    ) -> Result<Post, DomainError> {
        let post = Post::new(
            PostId::new(),
            metadata.user_id,
            cmd.content.as_deref(),
            cmd.image.as_deref(),
        )?;

        self.posts.insert(&post).await?;

        let event = PostCreated {
            event_id: EventId::new(),
            post_id: post.id(),
            author_id: post.author_id(),
            created_at: post.created_at(),
        };
        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::InMemoryEventBus;
    use crate::application::handlers::test_support::{metadata, seed_user};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn stores_post_and_publishes_event() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let ada = seed_user(&store, "ada@example.com").await;

        let post = CreatePostHandler::new(store.clone(), bus.clone())
            .handle(
                CreatePostCommand {
                    content: Some("  hello world  ".to_string()),
                    image: None,
                },
                metadata(&ada),
            )
            .await
            .unwrap();

        assert_eq!(post.content(), Some("hello world"));
        assert_eq!(post.author_id(), ada.id());
        assert_eq!(store.post_count(), 1);

        let events = bus.events_of_type("post.created.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation")
        );
    }

    #[tokio::test]
    async fn image_only_post_is_allowed() {
        let store = Arc::new(InMemoryStore::new());
        let ada = seed_user(&store, "ada@example.com").await;

        let post = CreatePostHandler::new(store.clone(), Arc::new(InMemoryEventBus::new()))
            .handle(
                CreatePostCommand {
                    content: None,
                    image: Some("https://cdn.example.com/cat.png".to_string()),
                },
                metadata(&ada),
            )
            .await
            .unwrap();

        assert_eq!(post.content(), None);
        assert!(post.image().is_some());
    }

    #[tokio::test]
    async fn empty_post_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let ada = seed_user(&store, "ada@example.com").await;

        let err = CreatePostHandler::new(store.clone(), bus.clone())
            .handle(
                CreatePostCommand {
                    content: Some("   ".to_string()),
                    image: None,
                },
                metadata(&ada),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(store.post_count(), 0);
        assert_eq!(bus.event_count(), 0);
    }
}
