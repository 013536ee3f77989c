// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, DateRange, NormalizedEvent, SearchCriteria, TimeOfDay, Venue};
pub use requests::{EventsQuery, SearchForm};
pub use responses::{ErrorResponse, EventsResponse, HealthResponse};
