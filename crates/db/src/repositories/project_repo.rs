//! Repository for the `projects` table.
//!
//! Reads that return projects to the API resolve the owning client with an
//! explicit `LEFT JOIN clients`, yielding [`ProjectWithClientRow`].

use clientdesk_core::analytics::{ProjectFacts, StatusCounts};
use clientdesk_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{
    CreateProject, ProjectFactsRow, ProjectFilter, ProjectWithClientRow, UpdateProject,
};

/// Project columns qualified with the `p` alias, plus the joined client columns.
const JOINED_COLUMNS: &str = "p.id, p.title, p.status, p.client_id, p.description, \
                              p.created_at, p.updated_at, \
                              c.name AS client_name, c.email AS client_email";

/// Provides CRUD and aggregate operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row joined with its client.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProject,
    ) -> Result<ProjectWithClientRow, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO projects (title, status, client_id, description)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM p LEFT JOIN clients c ON c.id = p.client_id"
        );
        sqlx::query_as::<_, ProjectWithClientRow>(&query)
            .bind(input.title.trim())
            .bind(input.status.as_str())
            .bind(input.client_id)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithClientRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p LEFT JOIN clients c ON c.id = p.client_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithClientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, newest created first.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectWithClientRow>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p LEFT JOIN clients c ON c.id = p.client_id
             WHERE ($1::TEXT IS NULL OR p.status = $1)
               AND ($2::BIGINT IS NULL OR p.client_id = $2)
               AND ($3::TEXT IS NULL OR p.title ILIKE '%' || $3 || '%')
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(escape_like);

        sqlx::query_as::<_, ProjectWithClientRow>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.client_id)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<ProjectWithClientRow>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE projects SET
                    title = COALESCE($2, title),
                    status = COALESCE($3, status),
                    client_id = COALESCE($4, client_id),
                    description = COALESCE($5, description)
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM p LEFT JOIN clients c ON c.id = p.client_id"
        );
        sqlx::query_as::<_, ProjectWithClientRow>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.client_id)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status counts, optionally restricted to one client.
    pub async fn status_counts(
        pool: &PgPool,
        client_id: Option<DbId>,
    ) -> Result<StatusCounts, sqlx::Error> {
        let (total, planning, in_progress, blocked, completed): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'Planning'),
                    COUNT(*) FILTER (WHERE status = 'In Progress'),
                    COUNT(*) FILTER (WHERE status = 'Blocked'),
                    COUNT(*) FILTER (WHERE status = 'Completed')
                 FROM projects
                 WHERE ($1::BIGINT IS NULL OR client_id = $1)",
            )
            .bind(client_id)
            .fetch_one(pool)
            .await?;

        Ok(StatusCounts {
            total,
            planning,
            in_progress,
            blocked,
            completed,
        })
    }

    /// Load the analytics view of every project, oldest created first.
    pub async fn list_facts(pool: &PgPool) -> Result<Vec<ProjectFacts>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ProjectFactsRow>(
            "SELECT client_id, status, created_at, updated_at
             FROM projects
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(ProjectFacts::from).collect())
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
