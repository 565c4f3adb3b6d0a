//! Repository for the `profiles` table.

use crate::models::profile::{ClientSummary, Profile, SyncProfile};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, identity_id, email, first_name, last_name, avatar_url, created_at, updated_at";

/// Provides read and upsert operations for profiles. Profiles are never
/// deleted by this system.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a profile for a first-time user, or refresh the existing row
    /// with the latest identity-provider data.
    pub async fn upsert(pool: &DbPool, input: &SyncProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (identity_id, email, first_name, last_name, avatar_url)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (identity_id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.identity_id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by the identity provider's user id.
    pub async fn find_by_identity(
        pool: &DbPool,
        identity_id: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE identity_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(identity_id)
            .fetch_optional(pool)
            .await
    }

    /// List all client profiles with their project counts, newest first.
    ///
    /// The administrator's own profile is excluded; only clients appear in
    /// the admin directory.
    pub async fn list_clients(
        pool: &DbPool,
        admin_email: &str,
    ) -> Result<Vec<ClientSummary>, sqlx::Error> {
        sqlx::query_as::<_, ClientSummary>(
            "SELECT p.identity_id, p.email, p.first_name, p.last_name, p.avatar_url,
                    COUNT(pr.id) AS project_count, p.created_at
             FROM profiles p
             LEFT JOIN projects pr ON pr.client_id = p.identity_id
             WHERE p.email <> $1
             GROUP BY p.id
             ORDER BY p.created_at DESC",
        )
        .bind(admin_email)
        .fetch_all(pool)
        .await
    }
}
