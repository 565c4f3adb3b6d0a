//! Handlers for the signed-in client's own project list.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use bbuilds_db::models::project::Project;
use bbuilds_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::middleware::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// GET /api/projects -- the caller's projects, most recently updated first.
pub async fn list_own(
    State(state): State<AppState>,
    Session(claims): Session,
) -> AppResult<Json<ProjectListResponse>> {
    let projects = ProjectRepo::list_for_client(&state.pool, &claims.sub).await?;
    Ok(Json(ProjectListResponse { projects }))
}
