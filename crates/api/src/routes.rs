//! Route tree construction.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects            own project list (session required)
/// /user/sync           profile sync (session required)
/// /admin/clients       client directory (admin only)
/// /admin/clients/{id}  client detail with roster (admin only)
/// /admin/projects      create, update, delete roster entries (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::projects::list_own))
        .route("/user/sync", post(handlers::sync::sync_profile))
        .route("/admin/clients", get(handlers::clients::list))
        .route("/admin/clients/{id}", get(handlers::clients::get_by_id))
        .route(
            "/admin/projects",
            post(handlers::admin_projects::create)
                .patch(handlers::admin_projects::update)
                .delete(handlers::admin_projects::delete),
        )
}
