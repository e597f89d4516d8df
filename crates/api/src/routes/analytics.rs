//! Route definitions for the `/analytics` resource. All admin-only.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(analytics::overview))
        .route("/timeline", get(analytics::timeline))
        .route("/client-distribution", get(analytics::client_distribution))
        .route("/status-trends", get(analytics::status_trends))
        .route("/performance", get(analytics::performance))
}
