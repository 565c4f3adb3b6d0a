//! The external identity collaborator.
//!
//! The provider owns sessions and user profiles; this system only reads
//! them. Two consumers exist: the admin email resolver and profile sync.

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;

use bbuilds_core::error::CoreError;

/// A user profile as the identity provider reports it.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    /// The provider's user id.
    pub id: String,
    /// Primary email address.
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Lookup interface against the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch a user by the provider's user id.
    ///
    /// Returns [`CoreError::NotFound`] for unknown ids and
    /// [`CoreError::Upstream`] when the provider is unreachable or errors.
    async fn user(&self, id: &str) -> Result<IdentityUser, CoreError>;
}

/// Fixed in-memory provider for tests and local development without a real
/// identity service.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    users: HashMap<String, IdentityUser>,
}

impl StaticIdentity {
    pub fn new(users: impl IntoIterator<Item = IdentityUser>) -> Self {
        StaticIdentity {
            users: users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn user(&self, id: &str) -> Result<IdentityUser, CoreError> {
        self.users
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "User",
                id: id.to_string(),
            })
    }
}
