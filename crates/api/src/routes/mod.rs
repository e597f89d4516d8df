pub mod analytics;
pub mod auth;
pub mod client;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/me                           current user (any token)
///
/// /clients                           list (scoped), create (admin)
/// /clients/{id}                      get (scoped), update, delete (admin)
///
/// /projects                          list (scoped), create (admin)
/// /projects/stats                    per-status counts (scoped)
/// /projects/{id}                     get (scoped), update, delete (admin)
///
/// /analytics/overview                status counts + completion rate (admin)
/// /analytics/timeline                monthly creation buckets (admin)
/// /analytics/client-distribution     projects per client (admin)
/// /analytics/status-trends           daily update buckets, last 30 days (admin)
/// /analytics/performance             completion metrics (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/clients", client::router())
        .nest("/projects", project::router())
        .nest("/analytics", analytics::router())
}
