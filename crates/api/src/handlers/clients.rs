//! Admin handlers for the client directory.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use bbuilds_core::error::CoreError;
use bbuilds_db::models::profile::{ClientSummary, Profile};
use bbuilds_db::models::project::Project;
use bbuilds_db::repositories::{ProfileRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::session::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub clients: Vec<ClientSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClientDetailResponse {
    pub client: Profile,
    pub projects: Vec<Project>,
}

/// GET /api/admin/clients -- all clients with a project count each.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ClientListResponse>> {
    let clients = ProfileRepo::list_clients(&state.pool, &state.config.admin_email).await?;
    Ok(Json(ClientListResponse { clients }))
}

/// GET /api/admin/clients/{id} -- one client profile plus its roster.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<ClientDetailResponse>> {
    let client = ProfileRepo::find_by_identity(&state.pool, &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Client",
                id: id.clone(),
            })
        })?;
    let projects = ProjectRepo::list_for_client(&state.pool, &id).await?;
    Ok(Json(ClientDetailResponse { client, projects }))
}
