//! Retrying HTTP transport shared by the API adapters.

use std::time::Duration;

use quorum_domain::{QuorumError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Thin wrapper over `reqwest` adding bounded retries with exponential
/// backoff.
///
/// Only failures that plausibly resolve on their own are retried: 5xx
/// responses, timeouts, and connection-level errors. 4xx responses are
/// returned as-is so each adapter can map them through its own error
/// handling. The run-level policy stays "no retry"; this is transport
/// smoothing only.
#[derive(Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    attempts: usize,
    backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Start a request on the underlying client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.inner.request(method, url)
    }

    /// Dispatch `builder`, retrying transient failures.
    ///
    /// The builder must be cloneable, which rules out streaming bodies;
    /// every adapter here sends buffered JSON.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let mut attempt = 1usize;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    QuorumError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(|err| QuorumError::from(InfraError::from(err)))?;
            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "dispatching request");

            let outcome = self.inner.execute(request).await;
            let transient = match &outcome {
                Ok(response) => response.status().is_server_error(),
                Err(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            };

            if !transient || attempt >= self.attempts {
                return outcome.map_err(|err| QuorumError::from(InfraError::from(err)));
            }

            let delay = self.delay_before(attempt + 1);
            debug!(attempt, %url, delay_ms = delay.as_millis() as u64, "retrying after backoff");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Backoff doubles per attempt, starting from the base delay.
    fn delay_before(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(2).min(8) as u32;
        self.backoff.saturating_mul(1u32 << exponent)
    }
}

/// Builder for [`HttpClient`]. The adapters use two configurations:
/// the defaults, and defaults plus a User-Agent.
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    attempts: usize,
    backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            attempts: 3,
            backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts, including the first try. Clamped to
    /// at least one.
    pub fn attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut inner = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            inner = inner.user_agent(agent);
        }

        let inner = inner.build().map_err(|err| QuorumError::from(InfraError::from(err)))?;
        Ok(HttpClient { inner, attempts: self.attempts, backoff: self.backoff })
    }
}
