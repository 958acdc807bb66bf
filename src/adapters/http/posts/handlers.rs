//! HTTP handlers for the feed, posts, likes and comments.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{CorrelationId, RequireAuth};
use crate::adapters::http::AppDependencies;
use crate::application::handlers::post::{
    CreateCommentCommand, CreateCommentHandler, CreatePostCommand, CreatePostHandler,
    DeletePostCommand, DeletePostHandler, GetFeedHandler, ToggleLikeCommand, ToggleLikeHandler,
};
use crate::domain::foundation::{CommandMetadata, PostId};
use crate::ports::{CommentView, LikeToggle};

use super::dto::{CreateCommentRequest, CreatePostRequest, PageQuery, PostListResponse, PostResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PostHandlers {
    feed_handler: Arc<GetFeedHandler>,
    create_handler: Arc<CreatePostHandler>,
    delete_handler: Arc<DeletePostHandler>,
    like_handler: Arc<ToggleLikeHandler>,
    comment_handler: Arc<CreateCommentHandler>,
}

impl PostHandlers {
    pub fn new(deps: &AppDependencies) -> Self {
        Self {
            feed_handler: Arc::new(GetFeedHandler::new(deps.post_reader.clone())),
            create_handler: Arc::new(CreatePostHandler::new(
                deps.posts.clone(),
                deps.event_publisher.clone(),
            )),
            delete_handler: Arc::new(DeletePostHandler::new(
                deps.posts.clone(),
                deps.event_publisher.clone(),
            )),
            like_handler: Arc::new(ToggleLikeHandler::new(
                deps.posts.clone(),
                deps.event_publisher.clone(),
            )),
            comment_handler: Arc::new(CreateCommentHandler::new(
                deps.posts.clone(),
                deps.users.clone(),
                deps.event_publisher.clone(),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/posts - Newest-first feed
pub async fn get_feed(
    State(handlers): State<PostHandlers>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let posts = handlers.feed_handler.handle(query.into()).await?;
    Ok(Json(PostListResponse { posts }))
}

/// POST /api/posts - Publish a post
pub async fn create_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let cmd = CreatePostCommand {
        content: req.content,
        image: req.image,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let post = handlers.create_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// DELETE /api/posts/:post_id - Delete one of the caller's posts
pub async fn delete_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiPath(post_id): ApiPath<PostId>,
) -> ApiResult<StatusCode> {
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);
    handlers
        .delete_handler
        .handle(DeletePostCommand { post_id }, metadata)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:post_id/like - Like or unlike
pub async fn toggle_like(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiPath(post_id): ApiPath<PostId>,
) -> ApiResult<Json<LikeToggle>> {
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);
    let toggle = handlers
        .like_handler
        .handle(ToggleLikeCommand { post_id }, metadata)
        .await?;
    Ok(Json(toggle))
}

/// POST /api/posts/:post_id/comments - Comment on a post
pub async fn create_comment(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiPath(post_id): ApiPath<PostId>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentView>)> {
    let cmd = CreateCommentCommand {
        post_id,
        content: req.content,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let comment = handlers.comment_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
