//! HTTP-backed calendar source.

use async_trait::async_trait;
use quorum_core::ports::CalendarSource;
use quorum_domain::{CalendarEvent, QuorumError, Result};
use reqwest::Method;
use tracing::{debug, warn};

use crate::errors::conversions::status_error;
use crate::http::HttpClient;
use crate::ical::parser::parse_calendar;

pub struct IcalFeedSource {
    http: HttpClient,
}

impl IcalFeedSource {
    pub fn new() -> Result<Self> {
        Ok(Self { http: HttpClient::builder().build()? })
    }
}

#[async_trait]
impl CalendarSource for IcalFeedSource {
    async fn list_events(&self, source: &str) -> Result<Vec<CalendarEvent>> {
        let response = self.http.send(self.http.request(Method::GET, source)).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, source, "calendar feed request failed");
            return Err(status_error(status));
        }

        let text = response.text().await.map_err(|err| {
            QuorumError::Network(format!("failed to read calendar feed body: {err}"))
        })?;

        let events = parse_calendar(&text);
        debug!(source, events = events.len(), "calendar feed parsed");
        Ok(events)
    }
}
