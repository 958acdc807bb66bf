//! Page redirect middleware.
//!
//! Applies `domain::auth::route_guard::evaluate` to every request. Only a
//! token that verifies counts as a session; a cookie that is merely present
//! does not.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::super::cookies::read_cookie;
use crate::domain::auth::route_guard::{self, GuardDecision};
use crate::domain::auth::{TokenKind, ACCESS_TOKEN_COOKIE};
use crate::ports::TokenService;

pub type RouteGuardState = Arc<dyn TokenService>;

pub async fn route_guard_middleware(
    State(tokens): State<RouteGuardState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if route_guard::is_exempt(&path) {
        return next.run(request).await;
    }

    let authenticated = read_cookie(request.headers(), ACCESS_TOKEN_COOKIE)
        .map(|token| tokens.verify(&token, TokenKind::Access).is_ok())
        .unwrap_or(false);

    match route_guard::evaluate(&path, authenticated) {
        GuardDecision::Continue => next.run(request).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(path = %path, location, authenticated, "Redirecting page request");
            Redirect::temporary(location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenService;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::http::header::{COOKIE, LOCATION};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn tokens() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(
            "test-secret-that-is-long-enough-123",
            "socialite",
            3600,
            604800,
        ))
    }

    fn app(tokens: Arc<JwtTokenService>) -> Router {
        let state: RouteGuardState = tokens;
        Router::new()
            .fallback(get(|| async { "page" }))
            .layer(axum::middleware::from_fn_with_state(state, route_guard_middleware))
    }

    async fn visit(app: Router, path: &str, cookie: Option<String>) -> (StatusCode, Option<String>) {
        let mut builder = axum::http::Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        (response.status(), location)
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_to_signin() {
        let (status, location) = visit(app(tokens()), "/en/dashboard", None).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[tokio::test]
    async fn forged_cookie_is_not_a_session() {
        let cookie = Some("access_token=not-a-jwt".to_string());
        let (status, location) = visit(app(tokens()), "/notifications", cookie).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }

    #[tokio::test]
    async fn signed_in_visitor_is_sent_home_from_signin() {
        let tokens = tokens();
        let access = tokens.issue(&UserId::new(), TokenKind::Access).unwrap();
        let cookie = Some(format!("access_token={}", access.token));

        let (status, location) = visit(app(tokens.clone()), "/signin", cookie.clone()).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/"));

        let (status, _) = visit(app(tokens), "/dashboard", cookie).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn refresh_token_does_not_count_as_session() {
        let tokens = tokens();
        let refresh = tokens.issue(&UserId::new(), TokenKind::Refresh).unwrap();
        let cookie = Some(format!("access_token={}", refresh.token));

        let (status, _) = visit(app(tokens), "/admin", cookie).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn api_paths_are_untouched() {
        let (status, location) = visit(app(tokens()), "/api/notifications", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(location.is_none());
    }
}
