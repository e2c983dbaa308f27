#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use portcullis_api::auth::jwt::JwtConfig;
use portcullis_api::auth::password::hash_password;
use portcullis_api::config::ServerConfig;
use portcullis_api::router::build_app_router;
use portcullis_api::state::AppState;
use portcullis_core::rate_limit::RateLimitConfig;
use portcullis_db::models::user::{CreateUser, User};
use portcullis_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Peer address attached to requests that do not pick their own.
pub const DEFAULT_PEER: &str = "203.0.113.10:40000";

/// Password used for every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "password123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default),
/// a fixed JWT secret, and the default login rate limit (5 per 60s, rolling).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 5,
        jwt: JwtConfig {
            secret: "integration-test-secret-for-session-tokens".to_string(),
            expiry_hours: 24,
        },
        cookie_secure: false,
        trust_proxy_headers: false,
        rate_limit: RateLimitConfig::default(),
        seed_demo_user: false,
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// using the given database pool and [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user directly, bypassing the API.
pub async fn create_user(pool: &PgPool, email: &str, username: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

fn with_peer(mut request: Request<Body>, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().expect("peer must be a socket address");
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

/// Send a request through the router.
pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, with_peer(request, DEFAULT_PEER)).await
}

/// Issue a GET request carrying a raw `Cookie` header value.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, with_peer(request, DEFAULT_PEER)).await
}

/// POST a JSON body from [`DEFAULT_PEER`].
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_json_from(app, uri, body, DEFAULT_PEER).await
}

/// POST a JSON body from the given peer address.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    peer: &str,
) -> Response {
    post_raw_from(app, uri, &body.to_string(), peer).await
}

/// POST an arbitrary (possibly malformed) JSON payload from the given peer.
pub async fn post_raw_from(app: Router, uri: &str, body: &str, peer: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, with_peer(request, peer)).await
}

/// POST the login form for `identifier` from [`DEFAULT_PEER`].
pub async fn login(app: Router, identifier: &str, password: &str) -> Response {
    post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": identifier, "password": password }),
    )
    .await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header of a response, if any.
pub fn set_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// The `name=value` pair from a response's `Set-Cookie` header, ready to be
/// replayed in a `Cookie` header.
pub fn session_cookie(response: &Response) -> String {
    let header = set_cookie_header(response).expect("response must set a cookie");
    header.split(';').next().unwrap().to_string()
}

/// POST a body with no `Content-Type` header from [`DEFAULT_PEER`].
pub async fn post_untyped(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, with_peer(request, DEFAULT_PEER)).await
}
