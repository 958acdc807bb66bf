//! Application router: every API area, the health check and the tower-http stack.

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::auth::{auth_routes, AuthHandlers};
use super::error::ErrorResponse;
use super::middleware::{auth_middleware, route_guard_middleware};
use super::notifications::{notification_routes, NotificationHandlers};
use super::posts::{post_routes, PostHandlers};
use super::profiles::{profile_routes, ProfileHandlers};
use super::users::{user_routes, UserHandlers};
use super::AppDependencies;
use crate::config::ServerConfig;

/// Cross-cutting settings for the outer layers.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl RouterSettings {
    pub fn from_config(server: &ServerConfig) -> Self {
        Self {
            request_timeout: server.request_timeout(),
            cors_origins: server.cors_origins_list(),
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "No such route")),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Builds the full application.
pub fn build_router(deps: AppDependencies, settings: RouterSettings) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes(AuthHandlers::new(&deps)))
        .nest("/posts", post_routes(PostHandlers::new(&deps)))
        .nest("/users", user_routes(UserHandlers::new(&deps)))
        .nest(
            "/notifications",
            notification_routes(NotificationHandlers::new(&deps)),
        )
        .merge(profile_routes(ProfileHandlers::new(&deps)));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(not_found)
        // Applied bottom-up: the last layer sees the request first.
        .layer(middleware::from_fn_with_state(
            deps.sessions.clone(),
            auth_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            deps.tokens.clone(),
            route_guard_middleware,
        ))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{JwtTokenService, MockPasswordHasher};
    use crate::adapters::http::cookies::CookieSettings;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::InMemoryEventBus;
    use axum::body::Body;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let deps = AppDependencies::in_memory(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(MockPasswordHasher),
            Arc::new(JwtTokenService::new(
                "test-secret-that-is-long-enough-123",
                "socialite",
                3600,
                604800,
            )),
            CookieSettings::default(),
        );
        build_router(deps, RouterSettings::default())
    }

    async fn get(path: &str) -> axum::response::Response {
        app()
            .oneshot(axum::http::Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = get("/api/nothing-here").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn private_page_redirects_anonymous_visitor() {
        let response = get("/vi/dashboard").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn protected_api_requires_session() {
        let response = get("/api/notifications").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
