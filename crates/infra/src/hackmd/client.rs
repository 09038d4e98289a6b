//! HackMD v1 API client.
//!
//! When a team workspace is configured, note operations are routed
//! through the team-scoped endpoints so documents land in the shared
//! workspace rather than the token owner's personal space.

use async_trait::async_trait;
use quorum_core::ports::NotesHost;
use quorum_domain::{ArtifactHandle, NotePermissions, NoteSummary, QuorumError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::errors::conversions::status_error;
use crate::http::HttpClient;

const HACKMD_API_BASE: &str = "https://api.hackmd.io/v1";

pub struct HackmdClient {
    http: HttpClient,
    base_url: String,
    token: String,
    team: Option<String>,
}

impl HackmdClient {
    pub fn new(token: impl Into<String>, team: Option<String>) -> Result<Self> {
        Self::with_base_url(token, team, HACKMD_API_BASE)
    }

    /// Point the client at an alternate API root, e.g. a mock server.
    pub fn with_base_url(
        token: impl Into<String>,
        team: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder().build()?;
        Ok(Self { http, base_url: base_url.into(), token: token.into(), team })
    }

    /// The notes collection path, team-scoped when a team is configured.
    fn notes_path(&self) -> String {
        match &self.team {
            Some(team) => format!("/teams/{team}/notes"),
            None => "/notes".to_string(),
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let mut request = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body, "HackMD API request failed");
            return Err(status_error(status));
        }

        response.json::<T>().await.map_err(|err| {
            QuorumError::InvalidInput(format!("failed to parse HackMD response: {err}"))
        })
    }

    async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        body: serde_json::Value,
    ) -> Result<()> {
        let request = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .json(&body);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body, "HackMD API request failed");
            return Err(status_error(status));
        }
        Ok(())
    }
}

#[async_trait]
impl NotesHost for HackmdClient {
    async fn create_note(
        &self,
        title: &str,
        content: &str,
        permissions: &NotePermissions,
    ) -> Result<ArtifactHandle> {
        let note: NoteDto = self
            .send_json(
                Method::POST,
                &self.notes_path(),
                Some(json!({
                    "title": title,
                    "content": content,
                    "readPermission": permissions.read,
                    "writePermission": permissions.write,
                    "commentPermission": permissions.comment,
                })),
            )
            .await?;
        let url = note.publish_url();
        Ok(ArtifactHandle { id: note.id, url })
    }

    async fn get_note(&self, id: &str) -> Result<String> {
        let path = format!("{}/{id}", self.notes_path());
        let note: NoteContentDto = self.send_json(Method::GET, &path, None).await?;
        Ok(note.content.unwrap_or_default())
    }

    async fn update_note(&self, id: &str, content: &str) -> Result<()> {
        let path = format!("{}/{id}", self.notes_path());
        self.send_no_content(Method::PATCH, &path, json!({ "content": content })).await
    }

    async fn list_notes(&self) -> Result<Vec<NoteSummary>> {
        let notes: Vec<NoteDto> = self.send_json(Method::GET, &self.notes_path(), None).await?;
        Ok(notes
            .into_iter()
            .map(|note| {
                let url = note.publish_url();
                NoteSummary { id: note.id, title: note.title.unwrap_or_default(), url }
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct NoteDto {
    id: String,
    title: Option<String>,
    #[serde(rename = "publishLink")]
    publish_link: Option<String>,
}

impl NoteDto {
    /// The share URL; the API omits `publishLink` for unpublished notes,
    /// in which case the canonical note URL is derived from the id.
    fn publish_url(&self) -> String {
        self.publish_link.clone().unwrap_or_else(|| format!("https://hackmd.io/{}", self.id))
    }
}

#[derive(Debug, Deserialize)]
struct NoteContentDto {
    content: Option<String>,
}
