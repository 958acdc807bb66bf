//! HTTP handlers for suggestions and follow toggling.

use std::sync::Arc;

use axum::{
    extract::State,
    Json,
};

use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::ApiPath;
use crate::adapters::http::middleware::{CorrelationId, RequireAuth};
use crate::adapters::http::AppDependencies;
use crate::application::handlers::social::{
    GetSuggestionsHandler, ToggleFollowCommand, ToggleFollowHandler,
};
use crate::domain::foundation::{CommandMetadata, UserId};

use super::dto::{FollowResponse, SuggestionsResponse};

#[derive(Clone)]
pub struct UserHandlers {
    suggestions_handler: Arc<GetSuggestionsHandler>,
    follow_handler: Arc<ToggleFollowHandler>,
}

impl UserHandlers {
    pub fn new(deps: &AppDependencies) -> Self {
        Self {
            suggestions_handler: Arc::new(GetSuggestionsHandler::new(deps.profiles.clone())),
            follow_handler: Arc::new(ToggleFollowHandler::new(
                deps.users.clone(),
                deps.follows.clone(),
                deps.event_publisher.clone(),
            )),
        }
    }
}

/// GET /api/users/suggestions - People the caller might follow
pub async fn get_suggestions(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<SuggestionsResponse>> {
    let users = handlers.suggestions_handler.handle(user.id).await?;
    Ok(Json(SuggestionsResponse { users }))
}

/// POST /api/users/:user_id/follow - Follow or unfollow
pub async fn toggle_follow(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    CorrelationId(correlation_id): CorrelationId,
    ApiPath(target_id): ApiPath<UserId>,
) -> ApiResult<Json<FollowResponse>> {
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);
    let following = handlers
        .follow_handler
        .handle(ToggleFollowCommand { target_id }, metadata)
        .await?;
    Ok(Json(FollowResponse { following }))
}
