//! HTTP handlers for sign-up, sign-in and session upkeep.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::cookies::{read_cookie, CookieSettings};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::AppDependencies;
use crate::application::handlers::auth::{
    GetCurrentUserHandler, RefreshSessionCommand, RefreshSessionHandler, SessionIssuer,
    SignInCommand, SignInHandler, SignOutCommand, SignOutHandler, SignUpCommand, SignUpHandler,
};
use crate::domain::auth::REFRESH_TOKEN_COOKIE;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{
    AccountResponse, RefreshRequest, SessionResponse, SignInRequest, SignUpRequest,
    SIGN_IN_SUCCESS, SIGN_UP_SUCCESS,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    sign_up_handler: Arc<SignUpHandler>,
    sign_in_handler: Arc<SignInHandler>,
    refresh_handler: Arc<RefreshSessionHandler>,
    sign_out_handler: Arc<SignOutHandler>,
    current_user_handler: Arc<GetCurrentUserHandler>,
    cookies: CookieSettings,
}

impl AuthHandlers {
    pub fn new(deps: &AppDependencies) -> Self {
        let sessions = SessionIssuer::new(deps.tokens.clone(), deps.refresh_tokens.clone());
        Self {
            sign_up_handler: Arc::new(SignUpHandler::new(
                deps.users.clone(),
                deps.hasher.clone(),
                deps.event_publisher.clone(),
            )),
            sign_in_handler: Arc::new(SignInHandler::new(
                deps.users.clone(),
                deps.hasher.clone(),
                sessions.clone(),
            )),
            refresh_handler: Arc::new(RefreshSessionHandler::new(deps.users.clone(), sessions)),
            sign_out_handler: Arc::new(SignOutHandler::new(deps.refresh_tokens.clone())),
            current_user_handler: Arc::new(GetCurrentUserHandler::new(deps.users.clone())),
            cookies: deps.cookies,
        }
    }
}

/// Refresh token from the cookie, or from the JSON body when no cookie is sent.
fn presented_refresh_token(headers: &HeaderMap, body: Option<Json<RefreshRequest>>) -> Option<String> {
    read_cookie(headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| body.and_then(|Json(req)| req.refresh_token))
        .filter(|t| !t.is_empty())
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/signup - Register an account
pub async fn sign_up(
    State(handlers): State<AuthHandlers>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> ApiResult<impl IntoResponse> {
    let cmd = SignUpCommand {
        name: req.name,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };

    let result = handlers.sign_up_handler.handle(cmd).await?;
    tracing::info!(user_id = %result.user.id(), "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(SIGN_UP_SUCCESS, &result.user)),
    ))
}

/// POST /api/auth/signin - Start a session
pub async fn sign_in(
    State(handlers): State<AuthHandlers>,
    ApiJson(req): ApiJson<SignInRequest>,
) -> ApiResult<impl IntoResponse> {
    let cmd = SignInCommand {
        email: req.email,
        password: req.password,
    };

    let result = handlers.sign_in_handler.handle(cmd).await?;
    tracing::info!(user_id = %result.user.id(), "Signed in");

    Ok((
        StatusCode::OK,
        handlers.cookies.session(&result.tokens),
        Json(SessionResponse::new(SIGN_IN_SUCCESS, &result.user)),
    ))
}

/// POST /api/auth/refresh - Exchange a refresh token for a new pair
pub async fn refresh(
    State(handlers): State<AuthHandlers>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<impl IntoResponse> {
    let refresh_token = presented_refresh_token(&headers, body).ok_or_else(|| {
        DomainError::new(ErrorCode::Unauthorized, "Session expired, please sign in again")
    })?;

    let result = handlers
        .refresh_handler
        .handle(RefreshSessionCommand { refresh_token })
        .await?;

    Ok((
        StatusCode::OK,
        handlers.cookies.session(&result.tokens),
        Json(AccountResponse::from(&result.user)),
    ))
}

/// POST /api/auth/signout - End the session
pub async fn sign_out(
    State(handlers): State<AuthHandlers>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> impl IntoResponse {
    let refresh_token = presented_refresh_token(&headers, body);
    handlers
        .sign_out_handler
        .handle(SignOutCommand { refresh_token })
        .await;

    (StatusCode::NO_CONTENT, handlers.cookies.cleared())
}

/// GET /api/auth/me - The signed-in account
pub async fn me(
    State(handlers): State<AuthHandlers>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<AccountResponse>> {
    let account = handlers.current_user_handler.handle(user.id).await?;
    Ok(Json(AccountResponse::from(&account)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn cookie_refresh_token_wins_over_body() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "refresh_token=from-cookie".parse().unwrap());
        let body = Some(Json(RefreshRequest {
            refresh_token: Some("from-body".to_string()),
        }));

        assert_eq!(
            presented_refresh_token(&headers, body),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn body_refresh_token_is_used_without_cookie() {
        let body = Some(Json(RefreshRequest {
            refresh_token: Some("from-body".to_string()),
        }));
        assert_eq!(
            presented_refresh_token(&HeaderMap::new(), body),
            Some("from-body".to_string())
        );
        assert_eq!(presented_refresh_token(&HeaderMap::new(), None), None);
    }
}
