//! CreateCommentHandler - Adds a comment to a post.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, CommentId, DomainError, ErrorCode, EventId, PostId, SerializableDomainEvent,
};
use crate::domain::post::{Comment, CommentCreated};
use crate::ports::{CommentView, EventPublisher, PostRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    pub post_id: PostId,
    pub content: String,
}

pub struct CreateCommentHandler {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateCommentHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            posts,
            users,
            event_publisher,
        }
    }

    /// Returns the stored comment with its author card.
    pub async fn handle(
        &self,
        cmd: CreateCommentCommand,
        metadata: CommandMetadata,
    ) -> Result<CommentView, DomainError> {
        let post = self.posts.find_by_id(&cmd.post_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::PostNotFound, format!("Post not found: {}", cmd.post_id))
        })?;
        let author = self.users.find_by_id(&metadata.user_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", metadata.user_id),
            )
        })?;

        let comment = Comment::new(CommentId::new(), post.id(), author.id(), &cmd.content)?;
        self.posts.insert_comment(&comment).await?;

        let event = CommentCreated {
            event_id: EventId::new(),
            comment_id: comment.id(),
            post_id: post.id(),
            post_author_id: post.author_id(),
            author_id: author.id(),
            created_at: comment.created_at(),
        };
        let envelope = event
            .to_envelope()?
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(CommentView {
            id: comment.id(),
            author: author.summary(),
            content: comment.content().to_string(),
            created_at: comment.created_at(),
        })
    }
}
