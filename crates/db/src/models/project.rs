//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use bbuilds_core::types::{ProjectStatus, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Owning client, the identity provider's user id.
    pub client_id: String,
    pub name: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub progress: i32,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `planning` if omitted.
    pub status: Option<ProjectStatus>,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0, max = 100, message = "progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}

/// DTO for updating an existing project. All fields but `id` are optional;
/// the server stamps `updated_at` on every update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    #[validate(range(min = 0, max = 100, message = "progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}
