use crate::core::criteria::{CriteriaBuilder, CriteriaError};
use crate::core::filters::filter_by_time_of_day;
use crate::core::translate::{UpstreamQueryParams, DEFAULT_PAGE_SIZE};
use crate::models::{EventsResponse, SearchCriteria, SearchForm};
use crate::services::{TicketmasterClient, UpstreamFetchError};
use std::sync::Arc;
use thiserror::Error;

/// Failure of a whole search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("Failed to fetch events: {0}")]
    Upstream(#[from] UpstreamFetchError),
}

/// Search orchestrator - runs the discovery pipeline for one request
///
/// # Pipeline Stages
/// 1. Translate criteria into upstream query parameters
/// 2. Fetch and normalize upstream events
/// 3. Apply the time-of-day bucket, if any
///
/// Holds no per-search state; no caching and no retries.
#[derive(Clone)]
pub struct EventSearch {
    upstream: Arc<TicketmasterClient>,
    builder: CriteriaBuilder,
    page_size: u16,
}

impl EventSearch {
    pub fn new(upstream: Arc<TicketmasterClient>, builder: CriteriaBuilder, page_size: u16) -> Self {
        Self {
            upstream,
            builder,
            page_size,
        }
    }

    pub fn with_defaults(upstream: Arc<TicketmasterClient>) -> Self {
        Self::new(upstream, CriteriaBuilder::default(), DEFAULT_PAGE_SIZE)
    }

    pub fn criteria_builder(&self) -> &CriteriaBuilder {
        &self.builder
    }

    /// Validate raw input, then search
    ///
    /// Invalid input is rejected before any upstream call.
    pub async fn search_form(&self, form: &SearchForm) -> Result<EventsResponse, SearchError> {
        let criteria = self.builder.build(form)?;
        self.search(&criteria).await
    }

    /// Run the pipeline for validated criteria
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<EventsResponse, SearchError> {
        let params = UpstreamQueryParams::from_criteria(criteria, self.page_size);

        let events = self.upstream.search_events(&params).await?;
        let fetched = events.len();

        let events = match criteria.time_of_day {
            Some(bucket) => filter_by_time_of_day(events, bucket),
            None => events,
        };

        tracing::info!(
            "Search at {} within {} miles: {} events ({} fetched)",
            params.latlong,
            params.radius,
            events.len(),
            fetched
        );

        Ok(EventsResponse { events })
    }
}
