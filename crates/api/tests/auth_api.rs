//! HTTP-level tests for `/auth/login`, `/auth/me` and token enforcement.

mod common;

use axum::http::StatusCode;
use clientdesk_core::roles::UserRole;
use common::{body_json, create_client, create_user, get, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_returns_token_and_user(pool: PgPool) {
    let user = create_user(&pool, "loginuser", UserRole::Admin, None).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_rejected_without_token(pool: PgPool) {
    create_user(&pool, "wrongpw", UserRole::Admin, None).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Invalid username or password");
    assert!(json.get("access_token").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_gets_same_message_as_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid username or password"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_token_authenticates_me(pool: PgPool) {
    let client = create_client(&pool, "Acme").await;
    create_user(&pool, "acme_user", UserRole::Client, Some(client.id)).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "acme_user", "password": TEST_PASSWORD });
    let login = body_json(post_json(app.clone(), "/api/v1/auth/login", body).await).await;
    let token = login["access_token"].as_str().expect("token is a string");

    let response = get_auth(app, "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["username"], "acme_user");
    assert_eq!(json["role"], "client");
    assert_eq!(json["client_id"], client.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn token_for_deleted_user_fails_me(pool: PgPool) {
    let user = create_user(&pool, "gone", UserRole::Admin, None).await;
    let token = common::token_for(&user);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_login_body_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "only-username" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
