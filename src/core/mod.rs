// Discovery pipeline exports
pub mod criteria;
pub mod filters;
pub mod search;
pub mod translate;

pub use criteria::{CriteriaBuilder, CriteriaError, DEFAULT_RADIUS_MILES, MAX_RADIUS_MILES};
pub use filters::{filter_by_time_of_day, matches_time_of_day};
pub use search::{EventSearch, SearchError};
pub use translate::UpstreamQueryParams;
