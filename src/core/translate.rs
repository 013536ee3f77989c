use chrono::{NaiveDateTime, TimeZone, Utc};
use crate::models::SearchCriteria;

/// Distance unit forwarded with every radius
pub const DISTANCE_UNIT: &str = "miles";

/// Soonest events first
pub const DEFAULT_SORT: &str = "date,asc";

/// Events requested per upstream call
pub const DEFAULT_PAGE_SIZE: u16 = 50;

/// Largest page the upstream serves in one call
pub const MAX_PAGE_SIZE: u16 = 200;

/// Typed query for the upstream event directory
///
/// Built by a pure mapping from [`SearchCriteria`]; the API key is added by
/// the client, not here. Time-of-day has no upstream counterpart and is
/// deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamQueryParams {
    /// `"lat,long"`
    pub latlong: String,
    pub radius: String,
    pub unit: &'static str,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub classification_name: Option<String>,
    pub sort: &'static str,
    pub size: u16,
}

impl UpstreamQueryParams {
    pub fn from_criteria(criteria: &SearchCriteria, page_size: u16) -> Self {
        let (start_date_time, end_date_time) = match &criteria.date_range {
            Some(range) => (
                Some(to_upstream_instant(range.start)),
                Some(to_upstream_instant(range.end)),
            ),
            None => (None, None),
        };

        Self {
            latlong: format!(
                "{},{}",
                criteria.center.latitude, criteria.center.longitude
            ),
            radius: criteria.radius_miles.to_string(),
            unit: DISTANCE_UNIT,
            start_date_time,
            end_date_time,
            classification_name: criteria.category.clone(),
            sort: DEFAULT_SORT,
            size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Ordered key/value pairs as the upstream names them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latlong", self.latlong.clone()),
            ("radius", self.radius.clone()),
            ("unit", self.unit.to_string()),
        ];

        if let Some(start) = &self.start_date_time {
            pairs.push(("startDateTime", start.clone()));
        }
        if let Some(end) = &self.end_date_time {
            pairs.push(("endDateTime", end.clone()));
        }
        if let Some(classification) = &self.classification_name {
            pairs.push(("classificationName", classification.clone()));
        }

        pairs.push(("sort", self.sort.to_string()));
        pairs.push(("size", self.size.to_string()));

        pairs
    }
}

/// Tag a local wall-clock value as UTC
///
/// The venue timezone is unknown at query time, so the wall-clock value is
/// forwarded unchanged with a `Z` suffix. Events close to midnight in zones
/// far from UTC can land on the wrong side of a day boundary.
fn to_upstream_instant(local: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&local)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}
