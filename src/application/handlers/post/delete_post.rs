//! DeletePostHandler - Command handler for removing a post.
//!
//! Only the author may delete. Likes, comments and notifications that
//! reference the post go with it.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventId, PostId, SerializableDomainEvent, Timestamp,
};
use crate::domain::post::PostDeleted;
use crate::ports::{EventPublisher, PostRepository};

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub post_id: PostId,
}

pub struct DeletePostHandler {
    posts: Arc<dyn PostRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeletePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            posts,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeletePostCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        let post = self.posts.find_by_id(&cmd.post_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", cmd.post_id))
        })?;

        post.authorize_delete(&metadata.user_id)?;

        self.posts.delete(&cmd.post_id).await?;
        tracing::info!(post_id = %cmd.post_id, "Post deleted");

        let event = PostDeleted {
            event_id: EventId::new(),
            post_id: cmd.post_id,
            author_id: post.author_id(),
            deleted_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::InMemoryEventBus;
    use crate::application::handlers::test_support::{metadata, seed_post, seed_user};
    use crate::domain::foundation::{CommentId, NotificationId};
    use crate::domain::notification::{Notification, NotificationKind};
    use crate::domain::post::{Comment, Like};
    use crate::ports::{NotificationRepository, PostReader};

    #[tokio::test]
    async fn author_deletes_post_and_its_activity() {
        let store = Arc::new(InMemoryStore::new());
        let bus = Arc::new(InMemoryEventBus::recording());
        let ada = seed_user(&store, "ada@example.com").await;
        let bob = seed_user(&store, "bob@example.com").await;
        let post = seed_post(&store, &ada, "bye").await;

        let comment = Comment::new(CommentId::new(), post.id(), bob.id(), "nice").unwrap();
        store.insert_comment(&comment).await.unwrap();
        store.toggle_like(&Like::new(bob.id(), post.id())).await.unwrap();
        let notice = Notification {
            id: NotificationId::new(),
            recipient_id: ada.id(),
            creator_id: bob.id(),
            kind: NotificationKind::Like,
            post_id: Some(post.id()),
            comment_id: None,
            read: false,
            created_at: Timestamp::now(),
        };
        NotificationRepository::insert(store.as_ref(), &notice).await.unwrap();

        DeletePostHandler::new(store.clone(), bus.clone())
            .handle(DeletePostCommand { post_id: post.id() }, metadata(&ada))
            .await
            .unwrap();

        assert_eq!(store.post_count(), 0);
        assert_eq!(store.notification_count(), 0);
        assert!(PostReader::get(store.as_ref(), &post.id()).await.unwrap().is_none());
        assert!(bus.has_event("post.deleted.v1"));
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = Arc::new(InMemoryStore::new());
        let ada = seed_user(&store, "ada@example.com").await;
        let bob = seed_user(&store, "bob@example.com").await;
        let post = seed_post(&store, &ada, "mine").await;

        let err = DeletePostHandler::new(store.clone(), Arc::new(InMemoryEventBus::new()))
            .handle(DeletePostCommand { post_id: post.id() }, metadata(&bob))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(store.post_count(), 1);
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let ada = seed_user(&store, "ada@example.com").await;

        let err = DeletePostHandler::new(store, Arc::new(InMemoryEventBus::new()))
            .handle(DeletePostCommand { post_id: PostId::new() }, metadata(&ada))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PostNotFound);
    }
}
