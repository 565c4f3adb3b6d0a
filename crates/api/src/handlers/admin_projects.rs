//! Admin handlers for roster project records.
//!
//! These are the create/update/delete verbs the roster editor replays a
//! working copy against. Progress bounds are enforced here as well as in
//! the editor, so no path can persist an out-of-range value.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bbuilds_core::error::CoreError;
use bbuilds_db::models::project::{CreateProject, Project, UpdateProject};
use bbuilds_db::repositories::{ProfileRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::session::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

/// POST /api/admin/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    input
        .validate()
        .map_err(|err| AppError::Core(CoreError::Validation(err.to_string())))?;

    // The owning client must exist before a roster entry can reference it.
    ProfileRepo::find_by_identity(&state.pool, &input.client_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Client",
                id: input.client_id.clone(),
            })
        })?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// PATCH /api/admin/projects -- body carries the id plus the fields to
/// change; the server stamps `updated_at`.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectResponse>> {
    input
        .validate()
        .map_err(|err| AppError::Core(CoreError::Validation(err.to_string())))?;

    let project = ProjectRepo::update(&state.pool, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: input.id.to_string(),
            })
        })?;
    Ok(Json(ProjectResponse { project }))
}

/// Query parameters for DELETE /api/admin/projects.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

/// DELETE /api/admin/projects?id={uuid}
///
/// A missing or malformed id fails query extraction with 400 before this
/// handler runs.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, params.id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: params.id.to_string(),
        }))
    }
}
