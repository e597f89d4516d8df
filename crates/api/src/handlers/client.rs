//! Handlers for the `/clients` resource.
//!
//! Reads are open to any authenticated user but filtered through
//! [`AuthUser::scope`]; writes require the admin role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientdesk_core::error::CoreError;
use clientdesk_core::types::DbId;
use clientdesk_core::validation::validate_input;
use clientdesk_db::models::client::{Client, CreateClient, UpdateClient};
use clientdesk_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::{AuthUser, Scope};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY: &str = "Client";

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    validate_input(&input)?;
    let client = ClientRepo::create(&state.pool, &input).await?;
    tracing::info!(client_id = client.id, user_id = admin.user_id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Client>>> {
    let clients = match user.scope() {
        Scope::All => ClientRepo::list(&state.pool).await?,
        Scope::Client(id) => ClientRepo::find_by_id(&state.pool, id)
            .await?
            .into_iter()
            .collect(),
        Scope::Nothing => Vec::new(),
    };
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Client>> {
    if !user.scope().allows(id) {
        return Err(AppError::not_found(ENTITY, id));
    }
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(client))
}

/// PATCH /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateClient>,
) -> AppResult<Json<Client>> {
    validate_input(&input)?;
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    tracing::info!(client_id = id, user_id = admin.user_id, "Client updated");
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
///
/// Rejected with 409 while any project still references the client.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let project_count = ClientRepo::project_count(&state.pool, id).await?;
    if project_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Client {id} still has {project_count} project(s); delete or reassign them first"
        ))));
    }

    if ClientRepo::delete(&state.pool, id).await? {
        tracing::info!(client_id = id, user_id = admin.user_id, "Client deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}
