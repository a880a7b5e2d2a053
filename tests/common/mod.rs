// Shared helpers for the integration tests: an app over a fresh
// in-memory database plus small request wrappers.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // for `app.oneshot()`

use pulse_hub::auth::AuthKeys;
use pulse_hub::{db, routes, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Qwerty12";

pub async fn test_app() -> Router {
    let pool = db::connect_pool("sqlite::memory:").await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    let state = AppState {
        pool,
        auth: AuthKeys::new(TEST_SECRET, 24),
        // Minimum cost keeps hashing fast in tests.
        bcrypt_cost: 4,
    };
    routes::app(state)
}

/// Fires one request and returns status plus parsed JSON body
/// (Null when the body is empty or not JSON).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn register_body(login: &str, is_public: bool) -> Value {
    json!({
        "login": login,
        "email": format!("{login}@example.com"),
        "password": PASSWORD,
        "countryCode": "RU",
        "isPublic": is_public,
    })
}

pub async fn register(app: &Router, login: &str, is_public: bool) {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(register_body(login, is_public)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

pub async fn sign_in(app: &Router, login: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/sign-in",
        None,
        Some(json!({ "login": login, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

/// Registers a user and returns a working bearer token for them.
pub async fn register_and_sign_in(app: &Router, login: &str, is_public: bool) -> String {
    register(app, login, is_public).await;
    sign_in(app, login, PASSWORD).await
}

pub async fn add_friend(app: &Router, token: &str, friend_login: &str) {
    let (status, _) = request(
        app,
        "POST",
        "/api/friends/add",
        Some(token),
        Some(json!({ "login": friend_login })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

pub async fn create_post(app: &Router, token: &str, content: &str, tags: Value) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/posts/new",
        Some(token),
        Some(json!({ "content": content, "tags": tags })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}
