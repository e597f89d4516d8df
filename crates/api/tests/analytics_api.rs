//! HTTP-level tests for the `/analytics` resource.

mod common;

use axum::http::StatusCode;
use clientdesk_core::roles::UserRole;
use clientdesk_core::status::ProjectStatus;
use common::{
    admin_token, body_json, create_client, create_project, create_user, get, get_auth,
    patch_json_auth, token_for,
};
use sqlx::PgPool;

const ENDPOINTS: [&str; 5] = [
    "/api/v1/analytics/overview",
    "/api/v1/analytics/timeline",
    "/api/v1/analytics/client-distribution",
    "/api/v1/analytics/status-trends",
    "/api/v1/analytics/performance",
];

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_a_project_moves_overview_counts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let acme = create_client(&pool, "Acme").await;
    let id = create_project(&pool, "Site Redesign", acme.id, ProjectStatus::Planning).await;
    create_project(&pool, "Portal", acme.id, ProjectStatus::InProgress).await;
    let app = common::build_test_app(pool);

    let before = body_json(get_auth(app.clone(), ENDPOINTS[0], &token).await).await;
    assert_eq!(before["total"], 2);
    assert_eq!(before["planning"], 1);
    assert_eq!(before["completed"], 0);
    assert_eq!(before["completion_rate"], 0.0);

    let body = serde_json::json!({ "status": "Completed" });
    let response = patch_json_auth(app.clone(), &format!("/api/v1/projects/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = body_json(get_auth(app, ENDPOINTS[0], &token).await).await;
    assert_eq!(after["total"], 2);
    assert_eq!(after["planning"], 0);
    assert_eq!(after["completed"], 1);
    assert_eq!(after["completion_rate"], 50.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_database_yields_zeroes(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let overview = body_json(get_auth(app.clone(), ENDPOINTS[0], &token).await).await;
    assert_eq!(overview["total"], 0);
    assert_eq!(overview["completion_rate"], 0.0);

    let timeline = body_json(get_auth(app.clone(), ENDPOINTS[1], &token).await).await;
    assert!(timeline.as_array().unwrap().is_empty());

    let performance = body_json(get_auth(app, ENDPOINTS[4], &token).await).await;
    assert_eq!(performance["total_projects"], 0);
    assert_eq!(performance["avg_completion_days"], 0);
    assert_eq!(performance["success_rate"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn timeline_and_trends_cover_fresh_projects(pool: PgPool) {
    let token = admin_token(&pool).await;
    let acme = create_client(&pool, "Acme").await;
    create_project(&pool, "A", acme.id, ProjectStatus::Planning).await;
    create_project(&pool, "B", acme.id, ProjectStatus::Blocked).await;
    create_project(&pool, "C", acme.id, ProjectStatus::Completed).await;
    let app = common::build_test_app(pool);

    let timeline = body_json(get_auth(app.clone(), ENDPOINTS[1], &token).await).await;
    let buckets = timeline.as_array().unwrap();
    let total: i64 = buckets.iter().map(|b| b["total"].as_i64().unwrap()).sum();
    assert_eq!(total, 3);
    assert!(buckets[0]["month"].is_string());

    let trends = body_json(get_auth(app, ENDPOINTS[3], &token).await).await;
    let buckets = trends.as_array().unwrap();
    let total: i64 = buckets.iter().map(|b| b["total"].as_i64().unwrap()).sum();
    assert_eq!(total, 3);
    assert!(buckets[0]["day"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stale_projects_drop_out_of_status_trends(pool: PgPool) {
    let token = admin_token(&pool).await;
    let acme = create_client(&pool, "Acme").await;
    let stale = create_project(&pool, "Old", acme.id, ProjectStatus::Completed).await;
    create_project(&pool, "Fresh", acme.id, ProjectStatus::Planning).await;

    // The updated_at trigger would overwrite the backdated value.
    sqlx::query("ALTER TABLE projects DISABLE TRIGGER USER")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "UPDATE projects SET created_at = NOW() - INTERVAL '90 days',
                             updated_at = NOW() - INTERVAL '60 days'
         WHERE id = $1",
    )
    .bind(stale)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("ALTER TABLE projects ENABLE TRIGGER USER")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let trends = body_json(get_auth(app.clone(), ENDPOINTS[3], &token).await).await;
    let total: i64 = trends
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["total"].as_i64().unwrap())
        .sum();
    assert_eq!(total, 1);

    let performance = body_json(get_auth(app, ENDPOINTS[4], &token).await).await;
    assert_eq!(performance["completed_projects"], 1);
    assert_eq!(performance["avg_completion_days"], 30);
    assert_eq!(performance["success_rate"], 50.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_distribution_joins_names(pool: PgPool) {
    let token = admin_token(&pool).await;
    let acme = create_client(&pool, "Acme").await;
    let globex = create_client(&pool, "Globex").await;
    create_project(&pool, "A1", acme.id, ProjectStatus::Completed).await;
    create_project(&pool, "A2", acme.id, ProjectStatus::InProgress).await;
    create_project(&pool, "G1", globex.id, ProjectStatus::Planning).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, ENDPOINTS[2], &token).await).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["client_name"], "Acme");
    assert_eq!(rows[0]["project_count"], 2);
    assert_eq!(rows[0]["completed"], 1);
    assert_eq!(rows[0]["in_progress"], 1);
    assert_eq!(rows[1]["client_name"], "Globex");
    assert_eq!(rows[1]["project_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn analytics_require_admin(pool: PgPool) {
    let acme = create_client(&pool, "Acme").await;
    let user = create_user(&pool, "acme_user", UserRole::Client, Some(acme.id)).await;
    let token = token_for(&user);
    let app = common::build_test_app(pool);

    for uri in ENDPOINTS {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");

        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
