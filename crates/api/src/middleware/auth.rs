//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clientdesk_core::error::CoreError;
use clientdesk_core::roles::UserRole;
use clientdesk_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    pub role: UserRole,
    /// Owning client for `client` role users.
    pub client_id: Option<DbId>,
}

/// Which projects and clients a user may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admins see everything.
    All,
    /// Client users see only their own client.
    Client(DbId),
    /// A client user without a client linkage sees nothing.
    Nothing,
}

impl Scope {
    /// Whether a record owned by `client_id` is visible.
    pub fn allows(self, client_id: DbId) -> bool {
        match self {
            Scope::All => true,
            Scope::Client(own) => own == client_id,
            Scope::Nothing => false,
        }
    }
}

impl AuthUser {
    pub fn scope(&self) -> Scope {
        match (self.role, self.client_id) {
            (UserRole::Admin, _) => Scope::All,
            (UserRole::Client, Some(id)) => Scope::Client(id),
            (UserRole::Client, None) => Scope::Nothing,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            client_id: claims.client_id,
        })
    }
}
