//! GitHub REST v3 client.
//!
//! All list endpoints are paginated with `per_page=100`; pages are
//! fetched until a short page signals the end of the collection.

use async_trait::async_trait;
use quorum_core::ports::IssueTracker;
use quorum_domain::{ArtifactHandle, IssueHit, IssueRef, QuorumError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::conversions::status_error;
use crate::http::HttpClient;

const GITHUB_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// GitHub requires a User-Agent on every API request.
const USER_AGENT: &str = "quorum-meeting-bot";

pub struct GithubClient {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Point the client at an alternate API root, e.g. a mock server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url: base_url.into(), token: token.into() })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self
            .http
            .request(Method::GET, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .query(query);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body, "GitHub API request failed");
            return Err(status_error(status));
        }

        response.json::<T>().await.map_err(|err| {
            QuorumError::InvalidInput(format!("failed to parse GitHub response: {err}"))
        })
    }

    /// Fetch every page of a list endpoint. A page shorter than
    /// `per_page` is the last one.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let mut query: Vec<(&str, String)> = query.to_vec();
            query.push(("per_page", PER_PAGE.to_string()));
            query.push(("page", page.to_string()));

            let batch: Vec<T> = self.get_json(path, &query).await?;
            let batch_len = batch.len();
            items.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!(path, items = items.len(), "paginated GitHub fetch complete");
        Ok(items)
    }

    async fn write_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let request = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&body);

        let response = self.http.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, path, body, "GitHub API write failed");
            return Err(status_error(status));
        }

        response.json::<T>().await.map_err(|err| {
            QuorumError::InvalidInput(format!("failed to parse GitHub response: {err}"))
        })
    }
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn list_public_repos(&self, org: &str) -> Result<Vec<String>> {
        let repos: Vec<RepoDto> = self
            .get_paginated(&format!("/orgs/{org}/repos"), &[("type", "public".to_string())])
            .await?;
        Ok(repos.into_iter().map(|repo| repo.name).collect())
    }

    async fn list_open_issues(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
    ) -> Result<Vec<IssueRef>> {
        let issues: Vec<IssueDto> = self
            .get_paginated(
                &format!("/repos/{owner}/{repo}/issues"),
                &[("labels", label.to_string()), ("state", "open".to_string())],
            )
            .await?;
        Ok(issues.into_iter().map(IssueDto::into_issue_ref).collect())
    }

    async fn search_issues(&self, query: &str) -> Result<Vec<IssueHit>> {
        let results: SearchResultsDto = self
            .get_json("/search/issues", &[("q", query.to_string())])
            .await?;
        Ok(results
            .items
            .into_iter()
            .map(|item| IssueHit {
                number: item.number,
                title: item.title,
                body: item.body,
                url: item.html_url,
            })
            .collect())
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<ArtifactHandle> {
        let issue: IssueDto = self
            .write_json(
                Method::POST,
                &format!("/repos/{owner}/{repo}/issues"),
                json!({ "title": title, "body": body, "labels": labels }),
            )
            .await?;
        Ok(ArtifactHandle { id: issue.number.to_string(), url: issue.html_url })
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<ArtifactHandle> {
        let issue: IssueDto = self
            .write_json(
                Method::PATCH,
                &format!("/repos/{owner}/{repo}/issues/{number}"),
                json!({ "body": body }),
            )
            .await?;
        Ok(ArtifactHandle { id: issue.number.to_string(), url: issue.html_url })
    }
}

#[derive(Debug, Deserialize)]
struct RepoDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IssueDto {
    number: u64,
    #[serde(default)]
    title: String,
    html_url: String,
    /// Present on items the issues endpoint reports that are really
    /// pull requests.
    pull_request: Option<serde_json::Value>,
}

impl IssueDto {
    fn into_issue_ref(self) -> IssueRef {
        IssueRef {
            number: self.number,
            title: self.title,
            url: self.html_url,
            pull_request: self.pull_request.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResultsDto {
    items: Vec<SearchItemDto>,
}

#[derive(Debug, Deserialize)]
struct SearchItemDto {
    number: u64,
    title: String,
    body: Option<String>,
    html_url: String,
}
