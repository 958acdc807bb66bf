//! HTTP handlers for public profiles and profile editing.

use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{CorrelationId, OptionalAuth, RequireAuth};
use crate::adapters::http::posts::{PageQuery, PostListResponse};
use crate::adapters::http::AppDependencies;
use crate::application::handlers::post::{GetUserPostsHandler, GetUserPostsQuery, UserPostsKind};
use crate::application::handlers::profile::{
    GetProfileHandler, GetProfileQuery, UpdateProfileCommand, UpdateProfileHandler,
};
use crate::domain::foundation::CommandMetadata;

use super::dto::{ProfileResponse, UpdateProfileRequest};

#[derive(Clone)]
pub struct ProfileHandlers {
    get_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
    posts_handler: Arc<GetUserPostsHandler>,
}

impl ProfileHandlers {
    pub fn new(deps: &AppDependencies) -> Self {
        Self {
            get_handler: Arc::new(GetProfileHandler::new(
                deps.profiles.clone(),
                deps.follows.clone(),
            )),
            update_handler: Arc::new(UpdateProfileHandler::new(
                deps.users.clone(),
                deps.profiles.clone(),
                deps.event_publisher.clone(),
            )),
            posts_handler: Arc::new(GetUserPostsHandler::new(
                deps.users.clone(),
                deps.post_reader.clone(),
            )),
        }
    }

    async fn user_posts(
        &self,
        username: String,
        kind: UserPostsKind,
        page: PageQuery,
    ) -> ApiResult<Json<PostListResponse>> {
        let query = GetUserPostsQuery {
            username,
            kind,
            page: page.into(),
        };
        let posts = self.posts_handler.handle(query).await?;
        Ok(Json(PostListResponse { posts }))
    }
}

/// GET /api/profiles/:username
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    OptionalAuth(viewer): OptionalAuth,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let query = GetProfileQuery {
        username,
        viewer: viewer.map(|v| v.id),
    };
    let details = handlers.get_handler.handle(query).await?;
    Ok(Json(details.into()))
}

/// GET /api/profiles/:username/posts
pub async fn get_user_posts(
    State(handlers): State<ProfileHandlers>,
    ApiPath(username): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResult<Json<PostListResponse>> {
    handlers
        .user_posts(username, UserPostsKind::Authored, page)
        .await
}

/// GET /api/profiles/:username/likes
pub async fn get_liked_posts(
    State(handlers): State<ProfileHandlers>,
    ApiPath(username): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> ApiResult<Json<PostListResponse>> {
    handlers.user_posts(username, UserPostsKind::Liked, page).await
}

/// PUT /api/profile - Edit the caller's profile
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let cmd = UpdateProfileCommand {
        name: req.name,
        bio: req.bio,
        location: req.location,
        website: req.website,
        image: req.image,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let profile = handlers.update_handler.handle(cmd, metadata).await?;
    Ok(Json(ProfileResponse::own(profile)))
}
