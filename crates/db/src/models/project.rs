//! Project entity model and DTOs.

use clientdesk_core::analytics::ProjectFacts;
use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::{DbId, Timestamp};
use clientdesk_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub client_id: DbId,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Name and email of the client owning a project, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
}

/// A project row joined (LEFT JOIN) with its client's name and email.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithClientRow {
    #[sqlx(flatten)]
    pub project: Project,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

/// API representation of a project with its client inlined.
///
/// `client` is `None` only if the referenced client row is missing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithClient {
    #[serde(flatten)]
    pub project: Project,
    pub client: Option<ClientSummary>,
}

impl From<ProjectWithClientRow> for ProjectWithClient {
    fn from(row: ProjectWithClientRow) -> Self {
        let client = row.client_name.map(|name| ClientSummary {
            id: row.project.client_id,
            name,
            email: row.client_email,
        });
        Self {
            project: row.project,
            client,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: String,
    #[serde(alias = "clientId")]
    pub client_id: DbId,
    /// Defaults to `Planning` if omitted.
    #[serde(default)]
    pub status: ProjectStatus,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub title: Option<String>,
    #[serde(alias = "clientId")]
    pub client_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
    pub description: Option<String>,
}

/// Optional list filters. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<DbId>,
    /// Case-insensitive substring match on the title.
    pub search: Option<String>,
}

/// Columns needed by the analytics aggregations.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectFactsRow {
    pub client_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectFactsRow> for ProjectFacts {
    fn from(row: ProjectFactsRow) -> Self {
        ProjectFacts {
            client_id: row.client_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
