/// Domain-level error taxonomy shared by the guard, the handlers, and the
/// roster editor.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The identity provider or the database service was unreachable or
    /// returned an error.
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl CoreError {
    /// Short machine-readable code for the error kind, used in JSON error
    /// bodies and save reports.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Upstream(_) => "UPSTREAM_FAILURE",
        }
    }
}

/// Failure to parse a project status string.
#[derive(Debug, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct ParseStatusError(pub String);
