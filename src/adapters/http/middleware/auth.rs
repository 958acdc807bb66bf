//! Session resolution middleware and extractors for axum.
//!
//! - `auth_middleware` - resolves the access token and injects the user into extensions
//! - `RequireAuth` - extractor that requires a signed-in user
//! - `OptionalAuth` - extractor for pages that also serve anonymous visitors
//!
//! The token comes from an `Authorization: Bearer` header or, failing that,
//! the `access_token` cookie. The two sources fail differently: a bad bearer
//! token is a client error and gets a 401, while a stale cookie just means
//! the browser has not refreshed yet, so the request continues anonymously.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::super::cookies::read_cookie;
use super::super::error::ErrorResponse;
use crate::domain::auth::ACCESS_TOKEN_COOKIE;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Where the access token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenSource {
    Bearer(String),
    Cookie(String),
}

impl TokenSource {
    fn from_parts(headers: &axum::http::HeaderMap) -> Option<Self> {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match bearer {
            Some(token) => Some(TokenSource::Bearer(token.to_string())),
            None => read_cookie(headers, ACCESS_TOKEN_COOKIE).map(TokenSource::Cookie),
        }
    }

    fn token(&self) -> &str {
        match self {
            TokenSource::Bearer(t) | TokenSource::Cookie(t) => t,
        }
    }
}

fn auth_error_response(err: &AuthError) -> Response {
    let (status, message) = match err {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
        _ => (StatusCode::UNAUTHORIZED, "Invalid token"),
    };

    (status, Json(ErrorResponse::new("AUTH_ERROR", message))).into_response()
}

/// Resolves the session for every request.
///
/// A valid token injects `AuthenticatedUser` into request extensions. A
/// missing token, or an unusable cookie, continues without a user.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(source) = TokenSource::from_parts(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(source.token()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => match source {
            TokenSource::Bearer(_) => auth_error_response(&e),
            TokenSource::Cookie(_) if e.requires_reauthentication() => {
                tracing::debug!(error = %e, "Ignoring stale session cookie");
                next.run(request).await
            }
            TokenSource::Cookie(_) => auth_error_response(&e),
        },
    }
}

/// Extractor that requires authentication.
///
/// Rejects with 401 when the middleware did not resolve a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid session was resolved for the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthenticated()),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::http::header::COOKIE;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ada@example.com", "ada")
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route(
                "/whoami",
                get(|OptionalAuth(user): OptionalAuth| async move {
                    user.map(|u| u.username).unwrap_or_else(|| "anonymous".to_string())
                }),
            )
            .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(app: Router, header: Option<(axum::http::HeaderName, &str)>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn bearer_token_resolves_user() {
        let app = app(MockSessionValidator::new().with_user("good", test_user()));
        let (status, body) = call(app, Some((AUTHORIZATION, "Bearer good"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada");
    }

    #[tokio::test]
    async fn cookie_token_resolves_user() {
        let app = app(MockSessionValidator::new().with_user("good", test_user()));
        let (status, body) = call(app, Some((COOKIE, "access_token=good"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada");
    }

    #[tokio::test]
    async fn invalid_bearer_is_rejected() {
        let app = app(MockSessionValidator::new());
        let (status, body) = call(app, Some((AUTHORIZATION, "Bearer nope"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("AUTH_ERROR"));
    }

    #[tokio::test]
    async fn invalid_cookie_continues_anonymously() {
        let app = app(MockSessionValidator::new());
        let (status, body) = call(app, Some((COOKIE, "access_token=stale"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[tokio::test]
    async fn unavailable_validator_fails_cookie_requests() {
        let app = app(MockSessionValidator::new().with_error(AuthError::service_unavailable("db down")));
        let (status, _) = call(app, Some((COOKIE, "access_token=any"))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn missing_token_continues_anonymously() {
        let app = app(MockSessionValidator::new());
        let (status, body) = call(app, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(COOKIE, "access_token=from-cookie".parse().unwrap());
        assert_eq!(
            TokenSource::from_parts(&headers),
            Some(TokenSource::Bearer("from-header".to_string()))
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        let request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn optional_auth_returns_none_when_absent() {
        let request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
