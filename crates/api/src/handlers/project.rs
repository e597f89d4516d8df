//! Handlers for the `/projects` resource.
//!
//! Every project returned here carries its client's `{id, name, email}`
//! resolved by the repository's `LEFT JOIN`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::analytics::StatusCounts;
use clientdesk_core::error::{CoreError, FieldViolation};
use clientdesk_core::types::DbId;
use clientdesk_core::validation::validate_input;
use clientdesk_db::models::project::{CreateProject, ProjectWithClient, UpdateProject};
use clientdesk_db::repositories::{ClientRepo, ProjectRepo};
use clientdesk_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{AuthUser, Scope};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ProjectListParams;
use crate::state::AppState;

const ENTITY: &str = "Project";

/// Reject a `client_id` that does not resolve to an existing client.
async fn ensure_client_exists(pool: &DbPool, client_id: DbId) -> AppResult<()> {
    if ClientRepo::exists(pool, client_id).await? {
        return Ok(());
    }
    Err(AppError::Core(CoreError::InvalidFields(vec![FieldViolation {
        field: "client_id".into(),
        message: format!("client {client_id} does not exist"),
    }])))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectWithClient>)> {
    validate_input(&input)?;
    ensure_client_exists(&state.pool, input.client_id).await?;

    let project = ProjectWithClient::from(ProjectRepo::create(&state.pool, &input).await?);
    tracing::info!(
        project_id = project.project.id,
        client_id = project.project.client_id,
        user_id = admin.user_id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects?status=&client_id=&search=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ProjectListParams>,
) -> AppResult<Json<Vec<ProjectWithClient>>> {
    let Some(filter) = params.into_filter(user.scope())? else {
        return Ok(Json(Vec::new()));
    };
    let projects = ProjectRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(ProjectWithClient::from)
        .collect();
    Ok(Json(projects))
}

/// GET /api/v1/projects/stats
pub async fn stats(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<StatusCounts>> {
    let counts = match user.scope() {
        Scope::All => ProjectRepo::status_counts(&state.pool, None).await?,
        Scope::Client(id) => ProjectRepo::status_counts(&state.pool, Some(id)).await?,
        Scope::Nothing => StatusCounts::default(),
    };
    Ok(Json(counts))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ProjectWithClient>> {
    let scope = user.scope();
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| scope.allows(row.project.client_id))
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(ProjectWithClient::from(project)))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<ProjectWithClient>> {
    validate_input(&input)?;
    if let Some(client_id) = input.client_id {
        ensure_client_exists(&state.pool, client_id).await?;
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    tracing::info!(
        project_id = id,
        status = %project.project.status,
        user_id = admin.user_id,
        "Project updated"
    );
    Ok(Json(ProjectWithClient::from(project)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, user_id = admin.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}
