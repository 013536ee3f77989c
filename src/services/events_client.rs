use crate::models::{ErrorResponse, EventsResponse, SearchCriteria};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a search issued from the client produced no usable result
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search failed with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidBody(String),
}

/// Client for the `/events` search endpoint
///
/// The browser-side counterpart of the search route: it serializes criteria
/// into the endpoint's query string and decodes the result for the view.
pub struct EventsClient {
    base_url: String,
    client: Client,
}

impl EventsClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, FetchFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Full search URL for the given criteria
    pub fn search_url(&self, criteria: &SearchCriteria) -> String {
        let query = criteria
            .to_endpoint_query()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}/events?{}", self.base_url.trim_end_matches('/'), query)
    }

    /// Run one search against the endpoint
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<EventsResponse, FetchFailure> {
        let url = self.search_url(criteria);
        tracing::debug!("Fetching events: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(FetchFailure::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchFailure::InvalidBody(e.to_string()))
    }
}
