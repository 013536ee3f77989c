//! Nearby Events - event discovery pipeline
//!
//! Turns loose search input into an upstream event-directory query,
//! normalizes the upstream records, applies the time-of-day filter the
//! upstream cannot express, and keeps a client map/list view in step with
//! the latest search.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod view;

// Re-export commonly used types
pub use crate::core::{CriteriaBuilder, CriteriaError, EventSearch, SearchError, UpstreamQueryParams};
pub use models::{Coordinates, EventsResponse, NormalizedEvent, SearchCriteria, SearchForm, TimeOfDay};
pub use services::{EventsClient, FetchFailure, TicketmasterClient, UpstreamFetchError};
pub use view::{ViewState, ViewSynchronizer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let criteria = CriteriaBuilder::default()
            .build(&SearchForm::at(40.7128, -74.0060))
            .unwrap();
        assert_eq!(criteria.radius_miles, 10.0);
    }
}
