use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Placeholder used when the upstream record has no name
pub const UNTITLED_EVENT: &str = "Untitled event";
/// Placeholder used when the upstream record has no description
pub const NO_DESCRIPTION: &str = "No description available";
/// Placeholder used when the upstream venue has no name
pub const UNKNOWN_VENUE: &str = "Venue unavailable";
/// Placeholder used when the upstream venue has no street address
pub const UNKNOWN_ADDRESS: &str = "Address unavailable";

/// A point on the map in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.validate().is_ok()
    }
}

/// Venue details, every field populated (placeholder or empty string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub address_line: String,
    pub city: String,
    pub state_code: String,
    pub postal_code: String,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: UNKNOWN_VENUE.to_string(),
            address_line: UNKNOWN_ADDRESS.to_string(),
            city: String::new(),
            state_code: String::new(),
            postal_code: String::new(),
        }
    }
}

/// Canonical event record produced by the upstream adapter
///
/// Every event handed to callers has coordinates; records without them are
/// dropped by the adapter rather than passed along with empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Local date at the venue, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,
    /// Local time at the venue, `HH:MM:SS`
    #[serde(default)]
    pub start_time: Option<String>,
    pub location: Coordinates,
    pub venue: Venue,
    #[serde(default)]
    pub detail_url: Option<String>,
}

impl NormalizedEvent {
    /// Parsed local start time, `None` when absent or unparsable
    pub fn local_time(&self) -> Option<NaiveTime> {
        self.start_time.as_deref().and_then(parse_time)
    }
}

/// Parse `HH:MM:SS` or `HH:MM`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Time-of-day bucket applied after the upstream fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    LateNight,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::LateNight => "late-night",
        }
    }

    /// Whether a local time falls in this bucket
    ///
    /// Late night wraps past midnight (22:00 through 05:59).
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        let hour = time.hour();
        match self {
            TimeOfDay::Morning => (6..=11).contains(&hour),
            TimeOfDay::Afternoon => (12..=17).contains(&hour),
            TimeOfDay::Evening => (18..=21).contains(&hour),
            TimeOfDay::LateNight => hour >= 22 || hour <= 5,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "late-night" | "latenight" | "night" => Ok(TimeOfDay::LateNight),
            other => Err(format!("unknown time of day: {}", other)),
        }
    }
}

/// Fully resolved local date/time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Validated search criteria, built once per search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub center: Coordinates,
    /// Always within `[0, max radius]`
    pub radius_miles: f64,
    pub date_range: Option<DateRange>,
    pub time_of_day: Option<TimeOfDay>,
    pub category: Option<String>,
}

impl SearchCriteria {
    /// Query pairs for the `/events` endpoint, in the shape the route parses back
    pub fn to_endpoint_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (
                "location",
                format!("{},{}", self.center.latitude, self.center.longitude),
            ),
            ("radius", self.radius_miles.to_string()),
        ];

        if let Some(range) = &self.date_range {
            pairs.push(("startDateTime", range.start.format("%Y-%m-%dT%H:%M:%S").to_string()));
            pairs.push(("endDateTime", range.end.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("eventType", category.clone()));
        }
        if let Some(bucket) = self.time_of_day {
            pairs.push(("timeOfDay", bucket.as_str().to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(40.7128, -74.0060).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.5).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_time_of_day_parsing() {
        assert_eq!("morning".parse::<TimeOfDay>(), Ok(TimeOfDay::Morning));
        assert_eq!("Late-Night".parse::<TimeOfDay>(), Ok(TimeOfDay::LateNight));
        assert_eq!("late_night".parse::<TimeOfDay>(), Ok(TimeOfDay::LateNight));
        assert!("brunch".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_late_night_wraps_midnight() {
        let bucket = TimeOfDay::LateNight;
        assert!(bucket.contains(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(bucket.contains(NaiveTime::from_hms_opt(0, 0, 0).unwrap()));
        assert!(bucket.contains(NaiveTime::from_hms_opt(5, 59, 59).unwrap()));
        assert!(!bucket.contains(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = NormalizedEvent {
            id: "evt-1".to_string(),
            name: "Jazz Night".to_string(),
            description: NO_DESCRIPTION.to_string(),
            start_date: Some("2025-04-12".to_string()),
            start_time: None,
            location: Coordinates::new(40.0, -74.0),
            venue: Venue::default(),
            detail_url: None,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startDate"], "2025-04-12");
        assert!(json["startTime"].is_null());
        assert_eq!(json["venue"]["addressLine"], UNKNOWN_ADDRESS);
        assert_eq!(json["location"]["latitude"], 40.0);
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("19:30"), NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(parse_time("19:30:15"), NaiveTime::from_hms_opt(19, 30, 15));
        assert_eq!(parse_time("7pm"), None);
    }
}
