//! Repository for the `projects` table.

use uuid::Uuid;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, description, status, progress, github_url, demo_url,
     created_at, updated_at";

/// Provides CRUD operations for projects. Deletes are hard deletes; an
/// admin removing a roster entry removes the row.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row with its generated
    /// id. Omitted status defaults to `planning`, omitted progress to 0;
    /// empty link strings are stored as NULL.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, name, description, status, progress, github_url, demo_url)
             VALUES ($1, $2, $3, COALESCE($4, 'planning'), COALESCE($5, 0), NULLIF($6, ''), NULLIF($7, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.map(|status| status.to_string()))
            .bind(input.progress)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .fetch_one(pool)
            .await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one client's projects, most recently updated first.
    pub async fn list_for_client(
        pool: &DbPool,
        client_id: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE client_id = $1 ORDER BY updated_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied; an
    /// empty string for a link field clears it. Stamps `updated_at`.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        pool: &DbPool,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                progress = COALESCE($5, progress),
                github_url = NULLIF(COALESCE($6, github_url), ''),
                demo_url = NULLIF(COALESCE($7, demo_url), ''),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status.map(|status| status.to_string()))
            .bind(input.progress)
            .bind(&input.github_url)
            .bind(&input.demo_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
