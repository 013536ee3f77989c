use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /events`
///
/// Everything arrives as loose strings; the criteria builder decides what is
/// usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EventsQuery {
    /// `"<lat>,<lng>"`
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub radius: Option<String>,
    #[serde(default, alias = "start_date_time", rename = "startDateTime")]
    pub start_date_time: Option<String>,
    #[serde(default, alias = "end_date_time", rename = "endDateTime")]
    pub end_date_time: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default, alias = "event_type", rename = "eventType")]
    pub event_type: Option<String>,
    #[serde(default, alias = "time_of_day", rename = "timeOfDay")]
    pub time_of_day: Option<String>,
}

/// Raw search form fields, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub time_of_day: Option<String>,
    pub category: Option<String>,
}

impl SearchForm {
    /// Form with just a location, as used for the initial search on page load
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            ..Default::default()
        }
    }
}

/// Split an ISO-8601 value such as `2025-04-12T19:30:00.000Z` into date and time parts
///
/// Values with an offset are converted to UTC. A bare date, or anything
/// chrono cannot read, is split textually and left to the criteria builder.
fn split_date_time(raw: Option<String>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };
    let raw = raw.trim();

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    if let Ok(instant) = parsed {
        return (
            Some(instant.format("%Y-%m-%d").to_string()),
            Some(instant.format("%H:%M:%S").to_string()),
        );
    }

    let raw = raw.trim_end_matches('Z');
    match raw.split_once('T') {
        Some((date, time)) => (Some(date.to_string()), Some(time.to_string())),
        None => (Some(raw.to_string()), None),
    }
}

impl From<EventsQuery> for SearchForm {
    fn from(query: EventsQuery) -> Self {
        let (latitude, longitude) = match query.location.as_deref().map(|l| l.split_once(',')) {
            Some(Some((lat, lng))) => (Some(lat.to_string()), Some(lng.to_string())),
            // A location without a comma is malformed rather than missing
            Some(None) => (query.location.clone(), Some(String::new())),
            None => (None, None),
        };

        let (start_date, start_time) = split_date_time(query.start_date_time);
        let (end_date, end_time) = split_date_time(query.end_date_time);

        Self {
            latitude,
            longitude,
            radius: query.radius,
            start_date,
            start_time,
            end_date,
            end_time,
            time_of_day: query.time_of_day,
            category: query.event_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_form() {
        let query = EventsQuery {
            location: Some("40.7,-74.0".to_string()),
            radius: Some("25".to_string()),
            start_date_time: Some("2025-04-12T18:00:00Z".to_string()),
            end_date_time: Some("2025-04-13".to_string()),
            event_type: Some("Music".to_string()),
            time_of_day: Some("evening".to_string()),
        };

        let form = SearchForm::from(query);
        assert_eq!(form.latitude.as_deref(), Some("40.7"));
        assert_eq!(form.longitude.as_deref(), Some("-74.0"));
        assert_eq!(form.start_date.as_deref(), Some("2025-04-12"));
        assert_eq!(form.start_time.as_deref(), Some("18:00:00"));
        assert_eq!(form.end_date.as_deref(), Some("2025-04-13"));
        assert_eq!(form.end_time, None);
        assert_eq!(form.category.as_deref(), Some("Music"));
    }

    #[test]
    fn test_iso_fractions_and_offsets_keep_time() {
        let query = EventsQuery {
            location: Some("40.7,-74.0".to_string()),
            start_date_time: Some("2025-04-12T18:00:00.000Z".to_string()),
            end_date_time: Some("2025-04-12T22:00:00+02:00".to_string()),
            ..Default::default()
        };

        let form = SearchForm::from(query);
        assert_eq!(form.start_date.as_deref(), Some("2025-04-12"));
        assert_eq!(form.start_time.as_deref(), Some("18:00:00"));
        assert_eq!(form.end_date.as_deref(), Some("2025-04-12"));
        assert_eq!(form.end_time.as_deref(), Some("20:00:00"));
    }

    #[test]
    fn test_offset_crossing_midnight_moves_date() {
        let query = EventsQuery {
            start_date_time: Some("2025-04-13T01:30:00+03:00".to_string()),
            end_date_time: Some("2025-04-12T19:30".to_string()),
            ..Default::default()
        };

        let form = SearchForm::from(query);
        assert_eq!(form.start_date.as_deref(), Some("2025-04-12"));
        assert_eq!(form.start_time.as_deref(), Some("22:30:00"));
        assert_eq!(form.end_time.as_deref(), Some("19:30:00"));
    }

    #[test]
    fn test_location_without_comma() {
        let query = EventsQuery {
            location: Some("40.7".to_string()),
            ..Default::default()
        };

        let form = SearchForm::from(query);
        assert_eq!(form.latitude.as_deref(), Some("40.7"));
        assert_eq!(form.longitude.as_deref(), Some(""));
    }
}
