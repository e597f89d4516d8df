//! Handlers for the `/analytics` resource.
//!
//! Each endpoint loads the project facts and runs one of the pure
//! aggregations in [`clientdesk_core::analytics`]. Nothing is cached.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use clientdesk_core::analytics::{
    self, ClientDistribution, Overview, PerformanceMetrics, StatusTrendBucket, TimelineBucket,
};
use clientdesk_db::repositories::{ClientRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/analytics/overview
pub async fn overview(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<Overview>> {
    let facts = ProjectRepo::list_facts(&state.pool).await?;
    Ok(Json(analytics::overview(&facts)))
}

/// GET /api/v1/analytics/timeline
pub async fn timeline(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<Vec<TimelineBucket>>> {
    let facts = ProjectRepo::list_facts(&state.pool).await?;
    Ok(Json(analytics::timeline(&facts)))
}

/// GET /api/v1/analytics/client-distribution
pub async fn client_distribution(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<Vec<ClientDistribution>>> {
    let facts = ProjectRepo::list_facts(&state.pool).await?;
    let names = ClientRepo::name_map(&state.pool).await?;
    Ok(Json(analytics::client_distribution(&facts, &names)))
}

/// GET /api/v1/analytics/status-trends
pub async fn status_trends(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<Vec<StatusTrendBucket>>> {
    let facts = ProjectRepo::list_facts(&state.pool).await?;
    Ok(Json(analytics::status_trends(&facts, Utc::now())))
}

/// GET /api/v1/analytics/performance
pub async fn performance(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<PerformanceMetrics>> {
    let facts = ProjectRepo::list_facts(&state.pool).await?;
    Ok(Json(analytics::performance(&facts)))
}
