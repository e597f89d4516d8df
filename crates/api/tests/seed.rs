//! Demo dataset loading.

mod common;

use axum::http::StatusCode;
use assert_matches::assert_matches;
use clientdesk_api::seed::{
    seed_demo_data, SeedError, SeedOutcome, ADMIN_PASSWORD, CLIENT_PASSWORD,
};
use clientdesk_core::roles::UserRole;
use common::{body_json, create_user, get_auth, post_json};
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {username}");
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seeding_is_idempotent(pool: PgPool) {
    let first = seed_demo_data(&pool).await.unwrap();
    assert_eq!(
        first,
        SeedOutcome::Seeded {
            clients: 3,
            users: 3,
            projects: 8,
        }
    );

    let second = seed_demo_data(&pool).await.unwrap();
    assert_eq!(second, SeedOutcome::AlreadySeeded);

    let (projects,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(projects, 8);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seeded_accounts_can_log_in(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let app = common::build_test_app(pool);

    let admin = login(app.clone(), "admin", ADMIN_PASSWORD).await;
    let overview = body_json(get_auth(app.clone(), "/api/v1/analytics/overview", &admin).await).await;
    assert_eq!(overview["total"], 8);
    assert_eq!(overview["planning"], 2);
    assert_eq!(overview["in_progress"], 3);
    assert_eq!(overview["blocked"], 1);
    assert_eq!(overview["completed"], 2);
    assert_eq!(overview["completion_rate"], 25.0);

    let acme = login(app.clone(), "acme_user", CLIENT_PASSWORD).await;
    let projects = body_json(get_auth(app, "/api/v1/projects", &acme).await).await;
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 3);
    assert!(projects
        .iter()
        .all(|p| p["client"]["name"] == "Acme Corporation"));
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_seed_rolls_back_and_can_be_retried(pool: PgPool) {
    // Taking a seeded username makes the seed fail after admin and the first client.
    let squatter = create_user(&pool, "acme_user", UserRole::Admin, None).await;

    let result = seed_demo_data(&pool).await;
    assert_matches!(result, Err(SeedError::Database(_)));
    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "clients").await, 0);
    assert_eq!(count(&pool, "projects").await, 0);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(squatter.id)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = seed_demo_data(&pool).await.unwrap();
    assert_matches!(outcome, SeedOutcome::Seeded { projects: 8, .. });
    assert_eq!(count(&pool, "users").await, 3);
    assert_eq!(count(&pool, "clients").await, 3);
}
