//! Admin email resolution.
//!
//! A session's email has two sources of truth: the claim embedded in the
//! token and the identity provider's user record. This module is the single
//! place that reconciles them -- claim first (no network round trip), then
//! a provider lookup by user id.

use bbuilds_core::error::CoreError;

use crate::auth::session::Claims;
use crate::identity::IdentityProvider;

/// Resolve the email address for an authenticated session.
pub async fn resolve_email(
    claims: &Claims,
    identity: &dyn IdentityProvider,
) -> Result<String, CoreError> {
    if let Some(email) = &claims.email {
        return Ok(email.clone());
    }
    let user = identity.user(&claims.sub).await?;
    Ok(user.email)
}

/// Decide whether a session belongs to the configured administrator.
///
/// The comparison is case-sensitive. Any resolution failure -- provider
/// unreachable, unknown user -- counts as a mismatch: elevated access is
/// denied, never granted on ambiguity.
pub async fn is_admin(
    claims: &Claims,
    identity: &dyn IdentityProvider,
    admin_email: &str,
) -> bool {
    match resolve_email(claims, identity).await {
        Ok(email) => email == admin_email,
        Err(err) => {
            tracing::warn!(
                user_id = %claims.sub,
                error = %err,
                "email resolution failed; denying admin access"
            );
            false
        }
    }
}
