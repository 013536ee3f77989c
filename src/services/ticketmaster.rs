use crate::core::translate::UpstreamQueryParams;
use crate::models::domain::{NO_DESCRIPTION, UNKNOWN_ADDRESS, UNKNOWN_VENUE, UNTITLED_EVENT};
use crate::models::{Coordinates, NormalizedEvent, Venue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Production Discovery API host
pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com";

const EVENTS_PATH: &str = "/discovery/v2/events.json";

/// Errors that can occur when fetching from the upstream event directory
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    MalformedBody(String),
}

impl UpstreamFetchError {
    /// Upstream HTTP status, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UpstreamFetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            UpstreamFetchError::Status { status, .. } => Some(*status),
            UpstreamFetchError::MalformedBody(_) => None,
        }
    }
}

/// Ticketmaster Discovery API client
///
/// Issues a single events query per search and maps the nested response into
/// [`NormalizedEvent`]s. The response shape never leaves this module.
pub struct TicketmasterClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl TicketmasterClient {
    /// Create a client pointed at the production API
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self, UpstreamFetchError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout_secs)
    }

    /// Create a client with a custom base URL (mock servers in tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, UpstreamFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(5)))
            .user_agent(concat!("nearby-events/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Search events around a point
    ///
    /// Either every usable record comes back or a single error does; a body
    /// that cannot be read never yields a partial list.
    pub async fn search_events(
        &self,
        params: &UpstreamQueryParams,
    ) -> Result<Vec<NormalizedEvent>, UpstreamFetchError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), EVENTS_PATH);
        let pairs = params.to_pairs();

        tracing::debug!("Querying upstream events: {} {:?}", url, pairs);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(&pairs)
            .send()
            .await
            .map_err(|e| UpstreamFetchError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Upstream events query failed: {} - {}", status, body);
            return Err(UpstreamFetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamFetchError::Transport(e.without_url()))?;
        let events = normalize_events(&body)?;

        tracing::debug!("Upstream returned {} usable events", events.len());

        Ok(events)
    }
}

/// Map a raw upstream response body into normalized events
///
/// Records without venue coordinates, and records that do not deserialize,
/// are dropped. A body that is not the expected envelope is an error.
pub fn normalize_events(body: &str) -> Result<Vec<NormalizedEvent>, UpstreamFetchError> {
    let envelope: EventsEnvelope = serde_json::from_str(body)
        .map_err(|e| UpstreamFetchError::MalformedBody(format!("Failed to parse events: {}", e)))?;

    let records = match envelope.embedded {
        Some(embedded) => embedded.events.unwrap_or_default(),
        // No `_embedded` block is how the upstream reports zero matches
        None => return Ok(Vec::new()),
    };

    let total = records.len();
    let events: Vec<NormalizedEvent> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<RawEvent>(record) {
            Ok(raw) => raw.normalize(),
            Err(e) => {
                tracing::warn!("Skipping unreadable event record: {}", e);
                None
            }
        })
        .collect();

    if events.len() < total {
        tracing::debug!("Dropped {} of {} events without usable venue data", total - events.len(), total);
    }

    Ok(events)
}

#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedEvents {
    events: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: Option<String>,
    name: Option<String>,
    info: Option<String>,
    description: Option<String>,
    please_note: Option<String>,
    url: Option<String>,
    dates: Option<RawDates>,
    #[serde(rename = "_embedded")]
    embedded: Option<RawEventEmbedded>,
}

#[derive(Debug, Deserialize)]
struct RawDates {
    start: Option<RawStart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStart {
    local_date: Option<String>,
    local_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEventEmbedded {
    venues: Option<Vec<RawVenue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVenue {
    name: Option<String>,
    postal_code: Option<String>,
    city: Option<RawNamed>,
    state: Option<RawState>,
    address: Option<RawAddress>,
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawState {
    state_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    line1: Option<String>,
}

/// Coordinates arrive as strings, occasionally as numbers
#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: Option<Value>,
    longitude: Option<Value>,
}

impl RawLocation {
    fn coordinates(&self) -> Option<Coordinates> {
        let latitude = self.latitude.as_ref().and_then(number)?;
        let longitude = self.longitude.as_ref().and_then(number)?;
        let coordinates = Coordinates::new(latitude, longitude);
        coordinates.is_valid().then_some(coordinates)
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Trimmed, non-empty text
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawEvent {
    fn normalize(self) -> Option<NormalizedEvent> {
        let venue = self
            .embedded
            .and_then(|e| e.venues)
            .and_then(|venues| venues.into_iter().next());

        let Some(venue) = venue else {
            tracing::trace!("Event {:?} has no venue", self.id);
            return None;
        };
        let Some(location) = venue.location.as_ref().and_then(RawLocation::coordinates) else {
            tracing::trace!("Event {:?} has no venue coordinates", self.id);
            return None;
        };

        let start = self.dates.and_then(|d| d.start);
        let (start_date, start_time) = match start {
            Some(start) => (text(start.local_date), text(start.local_time)),
            None => (None, None),
        };

        Some(NormalizedEvent {
            id: text(self.id).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: text(self.name).unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            description: text(self.info)
                .or_else(|| text(self.description))
                .or_else(|| text(self.please_note))
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            start_date,
            start_time,
            location,
            venue: Venue {
                name: text(venue.name).unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
                address_line: text(venue.address.and_then(|a| a.line1))
                    .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
                city: text(venue.city.and_then(|c| c.name)).unwrap_or_default(),
                state_code: text(venue.state.and_then(|s| s.state_code)).unwrap_or_default(),
                postal_code: text(venue.postal_code).unwrap_or_default(),
            },
            detail_url: text(self.url),
        })
    }
}
