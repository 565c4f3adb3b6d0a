//! Profile synchronization from the identity provider.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use bbuilds_db::models::profile::{Profile, SyncProfile};
use bbuilds_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::middleware::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub profile: Profile,
}

/// POST /api/user/sync -- refresh the caller's profile row from
/// identity-provider data, creating it on first sign-in.
pub async fn sync_profile(
    State(state): State<AppState>,
    Session(claims): Session,
) -> AppResult<Json<SyncResponse>> {
    let user = state.identity.user(&claims.sub).await?;

    let input = SyncProfile {
        identity_id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        avatar_url: user.avatar_url,
    };
    let profile = ProfileRepo::upsert(&state.pool, &input).await?;

    tracing::debug!(user_id = %claims.sub, "profile synchronized");
    Ok(Json(SyncResponse {
        success: true,
        profile,
    }))
}
