use std::sync::Arc;

use crate::config::ServerConfig;
use crate::identity::IdentityProvider;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bbuilds_db::DbPool,
    /// Server configuration (admin email, session secret, CORS, ...).
    pub config: Arc<ServerConfig>,
    /// Identity provider used by the email resolver and profile sync.
    pub identity: Arc<dyn IdentityProvider>,
}
