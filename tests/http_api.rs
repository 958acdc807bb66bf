//! End-to-end tests driving the full router over in-memory storage.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use socialite::adapters::auth::{JwtTokenService, MockPasswordHasher};
use socialite::adapters::http::{build_router, AppDependencies, CookieSettings, RouterSettings};
use socialite::adapters::memory::InMemoryStore;
use socialite::adapters::InMemoryEventBus;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let deps = AppDependencies::in_memory(
        Arc::new(InMemoryStore::new()),
        Arc::new(InMemoryEventBus::new()),
        Arc::new(MockPasswordHasher),
        Arc::new(JwtTokenService::new(
            "integration-secret-that-is-long-enough",
            "socialite",
            3600,
            604800,
        )),
        CookieSettings::default(),
    );
    build_router(deps, RouterSettings::default())
}

struct Reply {
    status: StatusCode,
    set_cookies: Vec<String>,
    location: Option<String>,
    body: Value,
}

impl Reply {
    /// `name=value` pairs from `Set-Cookie`, ready for a `Cookie` header.
    fn session_cookie(&self) -> String {
        self.set_cookies
            .iter()
            .filter_map(|c| c.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn cookie_value(&self, name: &str) -> Option<String> {
        self.set_cookies
            .iter()
            .filter_map(|c| c.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookies = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let location = response
        .headers()
        .get(LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Reply {
        status,
        set_cookies,
        location,
        body,
    }
}

async fn sign_up(app: &Router, name: &str, email: &str) -> Reply {
    let body = json!({
        "name": name,
        "email": email,
        "password": "secret1",
        "confirm_password": "secret1",
    });
    send(app, Method::POST, "/api/auth/signup", None, Some(body)).await
}

async fn sign_in(app: &Router, email: &str) -> Reply {
    let body = json!({ "email": email, "password": "secret1" });
    send(app, Method::POST, "/api/auth/signin", None, Some(body)).await
}

/// Registers and signs in, returning the session cookie.
async fn signed_in(app: &Router, name: &str, email: &str) -> String {
    assert_eq!(sign_up(app, name, email).await.status, StatusCode::CREATED);
    let reply = sign_in(app, email).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.session_cookie()
}

// =============================================================================
// Accounts and sessions
// =============================================================================

#[tokio::test]
async fn sign_up_reports_field_errors() {
    let app = app();

    let reply = send(
        &app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({ "name": "", "email": "nope", "password": "123", "confirm_password": "456" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let errors = &reply.body["details"]["errors"];
    assert!(errors["name"].is_array());
    assert!(errors["email"].is_array());
    assert!(errors["password"].is_array());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = app();

    let first = sign_up(&app, "Ada", "ada@example.com").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["message"], "Sign up successfully!");
    assert_eq!(first.body["user"]["username"], "ada");
    assert!(first.set_cookies.is_empty());

    let second = sign_up(&app, "Ada Again", "ADA@example.com").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(
        second.body["details"]["errors"]["email"][0],
        "User with this email already exists"
    );
}

#[tokio::test]
async fn sign_in_sets_session_cookies() {
    let app = app();
    sign_up(&app, "Ada", "ada@example.com").await;

    let unknown = send(
        &app,
        Method::POST,
        "/api/auth/signin",
        None,
        Some(json!({ "email": "who@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown.body["details"]["errors"]["email"][0],
        "Your email is not in the system!"
    );

    let wrong = send(
        &app,
        Method::POST,
        "/api/auth/signin",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-one" })),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["details"]["errors"]["email"][0], "Wrong password!");

    let reply = sign_in(&app, "ada@example.com").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["message"], "Login successfully!");
    assert_eq!(reply.set_cookies.len(), 2);
    assert!(reply.set_cookies[0].starts_with("access_token="));
    assert!(reply.set_cookies[0].contains("HttpOnly"));
    assert!(reply.set_cookies[0].contains("SameSite=Strict"));
    assert!(reply.set_cookies[0].contains("Max-Age=3600"));
    assert!(reply.set_cookies[1].contains("Max-Age=604800"));

    let me = send(&app, Method::GET, "/api/auth/me", Some(&reply.session_cookie()), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], "ada@example.com");
}

#[tokio::test]
async fn refresh_rotates_and_sign_out_clears() {
    let app = app();
    sign_up(&app, "Ada", "ada@example.com").await;
    let session = sign_in(&app, "ada@example.com").await;
    let old_refresh = session.cookie_value("refresh_token").unwrap();
    let old_cookie = format!("refresh_token={}", old_refresh);

    let refreshed = send(&app, Method::POST, "/api/auth/refresh", Some(&old_cookie), None).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["username"], "ada");
    let new_refresh = refreshed.cookie_value("refresh_token").unwrap();
    assert_ne!(new_refresh, old_refresh);

    let replay = send(&app, Method::POST, "/api/auth/refresh", Some(&old_cookie), None).await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    let signed_out = send(
        &app,
        Method::POST,
        "/api/auth/signout",
        Some(&refreshed.session_cookie()),
        None,
    )
    .await;
    assert_eq!(signed_out.status, StatusCode::NO_CONTENT);
    assert_eq!(signed_out.set_cookies.len(), 2);
    assert!(signed_out.set_cookies.iter().all(|c| c.contains("Max-Age=0")));

    let new_cookie = format!("refresh_token={}", new_refresh);
    let after = send(&app, Method::POST, "/api/auth/refresh", Some(&new_cookie), None).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn route_guard_uses_verified_session() {
    let app = app();
    let cookie = signed_in(&app, "Ada", "ada@example.com").await;

    let home = send(&app, Method::GET, "/en/signin", Some(&cookie), None).await;
    assert_eq!(home.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(home.location.as_deref(), Some("/"));

    let forged = send(&app, Method::GET, "/dashboard", Some("access_token=forged"), None).await;
    assert_eq!(forged.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(forged.location.as_deref(), Some("/signin"));
}

#[tokio::test]
async fn stale_cookie_is_anonymous_but_bad_bearer_is_rejected() {
    let app = app();

    let feed = send(&app, Method::GET, "/api/posts", Some("access_token=stale"), None).await;
    assert_eq!(feed.status, StatusCode::OK);

    let request = Request::builder()
        .uri("/api/posts")
        .header("authorization", "Bearer stale")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Feed, likes, comments, follows, notifications
// =============================================================================

#[tokio::test]
async fn social_flow_produces_notifications() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;
    let bob = signed_in(&app, "Bob", "bob@example.com").await;

    let created = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&ada),
        Some(json!({ "content": "Hello world" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let post_id = created.body["id"].as_str().unwrap().to_string();

    let liked = send(&app, Method::POST, &format!("/api/posts/{}/like", post_id), Some(&bob), None).await;
    assert_eq!(liked.status, StatusCode::OK);
    assert_eq!(liked.body, json!({ "liked": true, "like_count": 1 }));

    let commented = send(
        &app,
        Method::POST,
        &format!("/api/posts/{}/comments", post_id),
        Some(&bob),
        Some(json!({ "content": "Nice post" })),
    )
    .await;
    assert_eq!(commented.status, StatusCode::CREATED);
    assert_eq!(commented.body["author"]["username"], "bob");

    // Ada liking her own post notifies nobody.
    send(&app, Method::POST, &format!("/api/posts/{}/like", post_id), Some(&ada), None).await;

    let feed = send(&app, Method::GET, "/api/posts", None, None).await;
    let post = &feed.body["posts"][0];
    assert_eq!(post["author"]["username"], "ada");
    assert_eq!(post["like_count"], 2);
    assert_eq!(post["comment_count"], 1);
    assert_eq!(post["comments"][0]["content"], "Nice post");

    let inbox = send(&app, Method::GET, "/api/notifications", Some(&ada), None).await;
    let notifications = inbox.body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    let mut kinds: Vec<&str> = notifications
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    kinds.sort();
    assert_eq!(kinds, vec!["COMMENT", "LIKE"]);

    let unread = send(&app, Method::GET, "/api/notifications/unread-count", Some(&ada), None).await;
    assert_eq!(unread.body["count"], 2);

    let ids: Vec<Value> = notifications.iter().map(|n| n["id"].clone()).collect();
    let marked = send(
        &app,
        Method::POST,
        "/api/notifications/read",
        Some(&bob),
        Some(json!({ "ids": ids.clone() })),
    )
    .await;
    assert_eq!(marked.body["marked"], 0);

    let marked = send(
        &app,
        Method::POST,
        "/api/notifications/read",
        Some(&ada),
        Some(json!({ "ids": ids })),
    )
    .await;
    assert_eq!(marked.body["marked"], 2);

    let unread = send(&app, Method::GET, "/api/notifications/unread-count", Some(&ada), None).await;
    assert_eq!(unread.body["count"], 0);
}

#[tokio::test]
async fn follow_toggles_and_shows_on_profile() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;
    let bob = signed_in(&app, "Bob", "bob@example.com").await;

    let profile = send(&app, Method::GET, "/api/profiles/ada", Some(&bob), None).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["is_following"], false);
    let ada_id = profile.body["id"].as_str().unwrap().to_string();

    let own = send(&app, Method::POST, &format!("/api/users/{}/follow", ada_id), Some(&ada), None).await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let suggestions = send(&app, Method::GET, "/api/users/suggestions", Some(&bob), None).await;
    assert_eq!(suggestions.body["users"][0]["username"], "ada");

    let follow = send(&app, Method::POST, &format!("/api/users/{}/follow", ada_id), Some(&bob), None).await;
    assert_eq!(follow.body["following"], true);

    let profile = send(&app, Method::GET, "/api/profiles/ada", Some(&bob), None).await;
    assert_eq!(profile.body["is_following"], true);
    assert_eq!(profile.body["is_own_profile"], false);
    assert_eq!(profile.body["counts"]["followers"], 1);

    let suggestions = send(&app, Method::GET, "/api/users/suggestions", Some(&bob), None).await;
    assert_eq!(suggestions.body["users"].as_array().unwrap().len(), 0);

    let inbox = send(&app, Method::GET, "/api/notifications", Some(&ada), None).await;
    assert_eq!(inbox.body["notifications"][0]["kind"], "FOLLOW");

    let unfollow = send(&app, Method::POST, &format!("/api/users/{}/follow", ada_id), Some(&bob), None).await;
    assert_eq!(unfollow.body["following"], false);

    let missing = send(&app, Method::GET, "/api/profiles/nobody", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_author_deletes_a_post() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;
    let bob = signed_in(&app, "Bob", "bob@example.com").await;

    let created = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&ada),
        Some(json!({ "content": "Mine" })),
    )
    .await;
    let path = format!("/api/posts/{}", created.body["id"].as_str().unwrap());

    send(&app, Method::POST, &format!("{}/like", path), Some(&bob), None).await;

    let forbidden = send(&app, Method::DELETE, &path, Some(&bob), None).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = send(&app, Method::DELETE, &path, Some(&ada), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = send(&app, Method::DELETE, &path, Some(&ada), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let feed = send(&app, Method::GET, "/api/posts", None, None).await;
    assert_eq!(feed.body["posts"].as_array().unwrap().len(), 0);

    let inbox = send(&app, Method::GET, "/api/notifications", Some(&ada), None).await;
    assert_eq!(inbox.body["notifications"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn profile_edit_and_user_post_lists() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;
    let bob = signed_in(&app, "Bob", "bob@example.com").await;

    let updated = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&ada),
        Some(json!({ "name": "Ada L.", "bio": "Engines", "website": "ada.dev" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Ada L.");
    assert_eq!(updated.body["website_href"], "https://ada.dev");
    assert_eq!(updated.body["is_own_profile"], true);

    let invalid = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&ada),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let created = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&bob),
        Some(json!({ "content": "Bob's post" })),
    )
    .await;
    let post_id = created.body["id"].as_str().unwrap().to_string();
    send(&app, Method::POST, &format!("/api/posts/{}/like", post_id), Some(&ada), None).await;

    let authored = send(&app, Method::GET, "/api/profiles/bob/posts", None, None).await;
    assert_eq!(authored.body["posts"].as_array().unwrap().len(), 1);

    let liked = send(&app, Method::GET, "/api/profiles/ada/likes", None, None).await;
    assert_eq!(liked.body["posts"][0]["id"], post_id);

    let none = send(&app, Method::GET, "/api/profiles/ada/posts", None, None).await;
    assert_eq!(none.body["posts"].as_array().unwrap().len(), 0);

    let missing = send(&app, Method::GET, "/api/profiles/ghost/likes", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_edit_without_image_keeps_avatar() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;
    let avatar = "https://cdn.example.com/a.png";

    let with_avatar = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&ada),
        Some(json!({ "name": "Ada", "image": avatar })),
    )
    .await;
    assert_eq!(with_avatar.body["image"], avatar);

    let bio_edit = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&ada),
        Some(json!({ "name": "Ada L.", "bio": "x", "location": "", "website": "" })),
    )
    .await;
    assert_eq!(bio_edit.status, StatusCode::OK);
    assert_eq!(bio_edit.body["image"], avatar);

    let profile = send(&app, Method::GET, "/api/profiles/ada", None, None).await;
    assert_eq!(profile.body["image"], avatar);

    let removed = send(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&ada),
        Some(json!({ "name": "Ada L.", "image": "" })),
    )
    .await;
    assert!(removed.body["image"].is_null());
}

#[tokio::test]
async fn writes_require_a_session() {
    let app = app();

    let reply = send(
        &app,
        Method::POST,
        "/api/posts",
        None,
        Some(json!({ "content": "anonymous" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = app();
    let ada = signed_in(&app, "Ada", "ada@example.com").await;

    let bad_id = send(&app, Method::DELETE, "/api/posts/not-a-uuid", Some(&ada), None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["code"], "VALIDATION_FAILED");

    let bad_page = send(&app, Method::GET, "/api/posts?limit=many", None, None).await;
    assert_eq!(bad_page.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_page.body["code"], "VALIDATION_FAILED");

    let wrong_shape = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&ada),
        Some(json!({ "content": 42 })),
    )
    .await;
    assert_eq!(wrong_shape.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_shape.body["code"], "VALIDATION_FAILED");
}
