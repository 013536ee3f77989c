use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use crate::models::domain::parse_time;
use crate::models::{Coordinates, DateRange, SearchCriteria, SearchForm, TimeOfDay};

/// Radius used when the input is missing or not a number
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// Largest radius the upstream directory accepts
pub const MAX_RADIUS_MILES: f64 = 300.0;

/// Errors raised while turning raw input into search criteria
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("Location unavailable: latitude and longitude are required")]
    LocationUnavailable,

    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}

/// Builds [`SearchCriteria`] from raw form input
///
/// Strict about the location, lenient about everything else: a bad radius
/// falls back to the default and an unreadable date drops the date filter.
#[derive(Debug, Clone, Copy)]
pub struct CriteriaBuilder {
    default_radius_miles: f64,
    max_radius_miles: f64,
}

impl CriteriaBuilder {
    pub fn new(default_radius_miles: f64, max_radius_miles: f64) -> Self {
        let max_radius_miles = if max_radius_miles.is_finite() && max_radius_miles > 0.0 {
            max_radius_miles
        } else {
            MAX_RADIUS_MILES
        };
        let default_radius_miles = if default_radius_miles.is_finite() {
            default_radius_miles.clamp(0.0, max_radius_miles)
        } else {
            DEFAULT_RADIUS_MILES.min(max_radius_miles)
        };

        Self {
            default_radius_miles,
            max_radius_miles,
        }
    }

    pub fn max_radius_miles(&self) -> f64 {
        self.max_radius_miles
    }

    /// Build validated criteria from raw form fields
    pub fn build(&self, form: &SearchForm) -> Result<SearchCriteria, CriteriaError> {
        let center = parse_location(form)?;
        let radius_miles = self.parse_radius(non_empty(&form.radius));
        let date_range = parse_date_range(form)?;

        let time_of_day = non_empty(&form.time_of_day).and_then(|raw| match raw.parse::<TimeOfDay>() {
            Ok(bucket) => Some(bucket),
            Err(e) => {
                tracing::debug!("Ignoring time of day filter: {}", e);
                None
            }
        });

        let category = non_empty(&form.category).map(str::to_string);

        Ok(SearchCriteria {
            center,
            radius_miles,
            date_range,
            time_of_day,
            category,
        })
    }

    /// Parse and clamp a radius; never returns a value outside `[0, max]`
    pub fn parse_radius(&self, raw: Option<&str>) -> f64 {
        let radius = raw
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite())
            .unwrap_or(self.default_radius_miles);

        // `+ 0.0` turns -0.0 into 0.0
        radius.clamp(0.0, self.max_radius_miles) + 0.0
    }
}

impl Default for CriteriaBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_MILES, MAX_RADIUS_MILES)
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_location(form: &SearchForm) -> Result<Coordinates, CriteriaError> {
    let (Some(lat), Some(lng)) = (non_empty(&form.latitude), non_empty(&form.longitude)) else {
        return Err(CriteriaError::LocationUnavailable);
    };

    let latitude = lat
        .parse::<f64>()
        .map_err(|_| CriteriaError::InvalidCriteria(format!("latitude is not a number: {}", lat)))?;
    let longitude = lng
        .parse::<f64>()
        .map_err(|_| CriteriaError::InvalidCriteria(format!("longitude is not a number: {}", lng)))?;

    let center = Coordinates::new(latitude, longitude);
    if !center.is_valid() {
        return Err(CriteriaError::InvalidCriteria(format!(
            "location out of range: {},{}",
            latitude, longitude
        )));
    }

    Ok(center)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok();
    if parsed.is_none() {
        tracing::debug!("Ignoring unparsable date: {}", raw);
    }
    parsed
}

/// Resolve the optional date/time fields into a complete range
///
/// A lone date becomes a single-day search. Missing times default to the
/// start and end of the day.
fn parse_date_range(form: &SearchForm) -> Result<Option<DateRange>, CriteriaError> {
    let start_date = non_empty(&form.start_date).and_then(parse_date);
    let end_date = non_empty(&form.end_date).and_then(parse_date);

    let (start_date, end_date) = match (start_date, end_date) {
        (None, None) => return Ok(None),
        (Some(start), None) => (start, start),
        (None, Some(end)) => (end, end),
        (Some(start), Some(end)) => (start, end),
    };

    let start_time = non_empty(&form.start_time)
        .and_then(parse_time)
        .unwrap_or_default();
    let end_time = non_empty(&form.end_time)
        .and_then(parse_time)
        .unwrap_or_else(end_of_day);

    let range = DateRange {
        start: start_date.and_time(start_time),
        end: end_date.and_time(end_time),
    };

    if range.end < range.start {
        return Err(CriteriaError::InvalidCriteria(format!(
            "date range ends ({}) before it starts ({})",
            range.end, range.start
        )));
    }

    Ok(Some(range))
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}
