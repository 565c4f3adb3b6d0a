//! HTTP-backed roster store.
//!
//! [`HttpRosterStore`] implements [`RosterStore`] over the Roster API, so a
//! [`bbuilds_core::roster::RosterEditor`] can drive an admin editing
//! session against a running portal server with an admin session token.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use bbuilds_core::error::CoreError;
use bbuilds_core::roster::{RosterStore, StoredProject};
use bbuilds_core::types::{ClientId, ProjectFields};
use bbuilds_db::models::project::Project;

/// Roster store speaking JSON over HTTP to the portal's admin endpoints.
#[derive(Debug, Clone)]
pub struct HttpRosterStore {
    http: reqwest::Client,
    base_url: String,
    session_token: String,
}

#[derive(Debug, Deserialize)]
struct ClientDetailPayload {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct ProjectPayload {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

impl HttpRosterStore {
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpRosterStore {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: session_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Map a non-success response onto the domain taxonomy, preferring the
/// server's message string when the body parses.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorPayload>().await {
        Ok(payload) => payload.error,
        Err(_) => status.to_string(),
    };

    Err(match status {
        reqwest::StatusCode::UNAUTHORIZED => CoreError::Unauthorized(message),
        reqwest::StatusCode::FORBIDDEN => CoreError::Forbidden(message),
        reqwest::StatusCode::NOT_FOUND => CoreError::NotFound {
            entity: "Resource",
            id: message,
        },
        reqwest::StatusCode::BAD_REQUEST => CoreError::Validation(message),
        _ => CoreError::Upstream(message),
    })
}

fn transport(err: reqwest::Error) -> CoreError {
    CoreError::Upstream(format!("roster api request failed: {err}"))
}

fn into_stored(project: Project) -> StoredProject {
    StoredProject {
        id: project.id,
        fields: ProjectFields {
            name: project.name,
            description: project.description,
            status: project.status,
            progress: project.progress,
            github_url: project.github_url,
            demo_url: project.demo_url,
        },
        updated_at: project.updated_at,
    }
}

/// Full-field JSON body for create and update calls. Link fields are sent
/// as empty strings when cleared, which the server stores as NULL.
fn fields_body(fields: &ProjectFields) -> serde_json::Value {
    json!({
        "name": fields.name,
        "description": fields.description,
        "status": fields.status,
        "progress": fields.progress,
        "github_url": fields.github_url.clone().unwrap_or_default(),
        "demo_url": fields.demo_url.clone().unwrap_or_default(),
    })
}

#[async_trait]
impl RosterStore for HttpRosterStore {
    async fn fetch(&self, client: &ClientId) -> Result<Vec<StoredProject>, CoreError> {
        let response = self
            .http
            .get(self.url(&format!("/api/admin/clients/{client}")))
            .bearer_auth(&self.session_token)
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;

        let payload: ClientDetailPayload = response
            .json()
            .await
            .map_err(|err| CoreError::Upstream(format!("malformed roster response: {err}")))?;
        Ok(payload.projects.into_iter().map(into_stored).collect())
    }

    async fn create(
        &self,
        client: &ClientId,
        fields: &ProjectFields,
    ) -> Result<StoredProject, CoreError> {
        let mut body = fields_body(fields);
        body["client_id"] = json!(client);

        let response = self
            .http
            .post(self.url("/api/admin/projects"))
            .bearer_auth(&self.session_token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let response = check(response).await?;

        let payload: ProjectPayload = response
            .json()
            .await
            .map_err(|err| CoreError::Upstream(format!("malformed roster response: {err}")))?;
        Ok(into_stored(payload.project))
    }

    async fn update(&self, id: Uuid, fields: &ProjectFields) -> Result<(), CoreError> {
        let mut body = fields_body(fields);
        body["id"] = json!(id);

        let response = self
            .http
            .patch(self.url("/api/admin/projects"))
            .bearer_auth(&self.session_token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CoreError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/admin/projects?id={id}")))
            .bearer_auth(&self.session_token)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}
