#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clientdesk_api::auth::jwt::{generate_access_token, JwtConfig, TokenSubject};
use clientdesk_api::auth::password::hash_password;
use clientdesk_api::config::ServerConfig;
use clientdesk_api::router::build_app_router;
use clientdesk_api::state::AppState;
use clientdesk_core::roles::UserRole;
use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::DbId;
use clientdesk_db::models::client::{Client, CreateClient};
use clientdesk_db::models::project::CreateProject;
use clientdesk_db::models::user::{CreateUser, User};
use clientdesk_db::repositories::{ClientRepo, ProjectRepo, UserRepo};

pub const TEST_PASSWORD: &str = "test_password_123";

/// Server configuration used by every integration test.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the production router (same middleware stack) over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    role: UserRole,
    client_id: Option<DbId>,
) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role,
        client_id,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint a bearer token for `user` without going through `/auth/login`.
pub fn token_for(user: &User) -> String {
    let subject = TokenSubject {
        user_id: user.id,
        username: &user.username,
        role: user.role,
        client_id: user.client_id,
    };
    generate_access_token(subject, &test_config().jwt).expect("token generation should succeed")
}

/// Create an admin user and return a token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = create_user(pool, "admin", UserRole::Admin, None).await;
    token_for(&admin)
}

pub async fn create_client(pool: &PgPool, name: &str) -> Client {
    let input = CreateClient {
        name: name.to_string(),
        email: Some(format!("contact@{}.test", name.to_lowercase().replace(' ', "-"))),
        notes: None,
    };
    ClientRepo::create(pool, &input)
        .await
        .expect("client creation should succeed")
}

pub async fn create_project(
    pool: &PgPool,
    title: &str,
    client_id: DbId,
    status: ProjectStatus,
) -> DbId {
    let input = CreateProject {
        title: title.to_string(),
        client_id,
        status,
        description: None,
    };
    ProjectRepo::create(pool, &input)
        .await
        .expect("project creation should succeed")
        .project
        .id
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
