//! The Access Guard: a single chokepoint evaluating every request before
//! any page or API logic runs.
//!
//! Page navigation under the protected prefixes resolves to allow or a
//! redirect; the guard itself never errors past its boundary. JSON status
//! codes for the API surface are handled separately by the extractors in
//! [`crate::middleware::session`] -- `/api` paths are public here.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::resolver::is_admin;
use crate::auth::session::{token_from_headers, validate_session_token};
use crate::state::AppState;

/// Public login entry point unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/client-portal";
/// Authenticated home non-admin visitors are sent to from admin pages.
pub const CLIENT_HOME_PATH: &str = "/dashboard";

/// How the guard treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathClass {
    /// No session required.
    Public,
    /// Requires any authenticated session.
    Protected,
    /// Requires the administrator's session.
    Admin,
}

fn classify(path: &str) -> PathClass {
    if path == "/admin" || path.starts_with("/admin/") {
        PathClass::Admin
    } else if path == "/dashboard" || path.starts_with("/dashboard/") {
        PathClass::Protected
    } else {
        PathClass::Public
    }
}

/// Decide `ALLOW`, `REDIRECT(login)`, or `REDIRECT(client home)` for one
/// request.
///
/// Admin paths additionally require the session's resolved email to match
/// the configured administrator; a resolution failure counts as a mismatch
/// (fail closed).
pub async fn access_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let class = classify(request.uri().path());
    if class == PathClass::Public {
        return next.run(request).await;
    }

    let claims = token_from_headers(request.headers())
        .and_then(|token| validate_session_token(&token, &state.config.session.secret).ok());

    let Some(claims) = claims else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    if class == PathClass::Admin
        && !is_admin(&claims, state.identity.as_ref(), &state.config.admin_email).await
    {
        tracing::info!(user_id = %claims.sub, path = request.uri().path(), "non-admin redirected from admin page");
        return Redirect::to(CLIENT_HOME_PATH).into_response();
    }

    next.run(request).await
}
