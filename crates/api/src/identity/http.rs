//! reqwest-backed identity provider client.

use async_trait::async_trait;
use serde::Deserialize;

use bbuilds_core::error::CoreError;

use super::{IdentityProvider, IdentityUser};
use crate::config::IdentityConfig;

/// Client for the identity provider's backend REST API
/// (`GET {base_url}/v1/users/{id}` with a server-side API key).
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

/// Wire shape of the provider's user object.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
    email_addresses: Vec<EmailAddressPayload>,
}

#[derive(Debug, Deserialize)]
struct EmailAddressPayload {
    email_address: String,
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Self {
        HttpIdentityProvider {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn user(&self, id: &str) -> Result<IdentityUser, CoreError> {
        let url = format!("{}/v1/users/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|err| CoreError::Upstream(format!("identity provider request failed: {err}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound {
                entity: "User",
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(CoreError::Upstream(format!(
                "identity provider returned {}",
                response.status()
            )));
        }

        let payload: UserPayload = response
            .json()
            .await
            .map_err(|err| CoreError::Upstream(format!("malformed identity response: {err}")))?;

        let email = payload
            .email_addresses
            .into_iter()
            .next()
            .map(|entry| entry.email_address)
            .ok_or_else(|| CoreError::Upstream("identity user has no email address".to_string()))?;

        Ok(IdentityUser {
            id: payload.id,
            email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            avatar_url: payload.image_url,
        })
    }
}
