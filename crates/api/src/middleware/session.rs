//! Session-based extractors for API handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bbuilds_core::error::CoreError;

use crate::auth::resolver::is_admin;
use crate::auth::session::{token_from_headers, validate_session_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated session extracted from the `Authorization` header or the
/// session cookie.
///
/// Use this as an extractor parameter in any handler that requires a
/// signed-in user:
///
/// ```ignore
/// async fn my_handler(Session(claims): Session) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %claims.sub, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session(pub Claims);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing session token".into()))
        })?;

        let claims = validate_session_token(&token, &state.config.session.secret).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(Session(claims))
    }
}

/// Requires the session's resolved email to match the configured
/// administrator. Rejects with 403 Forbidden otherwise, including when
/// email resolution itself fails (fail closed).
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Session(claims) = Session::from_request_parts(parts, state).await?;

        if !is_admin(&claims, state.identity.as_ref(), &state.config.admin_email).await {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administrator access required".into(),
            )));
        }
        Ok(RequireAdmin(claims))
    }
}
