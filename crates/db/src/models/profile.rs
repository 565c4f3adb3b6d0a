//! Profile entity model and DTOs.
//!
//! Profiles mirror identity-provider users into the database. They are
//! created on a user's first sync, refreshed on later syncs, and never
//! deleted by this system.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bbuilds_core::types::Timestamp;

/// A profile row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    /// The identity provider's user id (`projects.client_id` references this).
    pub identity_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or refreshing a profile from identity-provider data.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncProfile {
    pub identity_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A profile joined with its project count, for the admin client directory.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClientSummary {
    pub identity_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub project_count: i64,
    pub created_at: Timestamp,
}
