use crate::models::{NormalizedEvent, TimeOfDay};

/// Check if an event starts within a time-of-day bucket
///
/// Events without a readable start time always pass.
#[inline]
pub fn matches_time_of_day(event: &NormalizedEvent, bucket: TimeOfDay) -> bool {
    match event.local_time() {
        Some(time) => bucket.contains(time),
        None => true,
    }
}

/// Keep the events whose local start hour falls in `bucket`
///
/// Applied after the upstream fetch, since the upstream has no time-of-day
/// axis. Idempotent.
pub fn filter_by_time_of_day(events: Vec<NormalizedEvent>, bucket: TimeOfDay) -> Vec<NormalizedEvent> {
    events
        .into_iter()
        .filter(|event| matches_time_of_day(event, bucket))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, Venue};

    fn create_test_event(id: &str, start_time: Option<&str>) -> NormalizedEvent {
        NormalizedEvent {
            id: id.to_string(),
            name: format!("Event {}", id),
            description: "Test event".to_string(),
            start_date: Some("2025-04-12".to_string()),
            start_time: start_time.map(str::to_string),
            location: Coordinates::new(40.7128, -74.0060),
            venue: Venue::default(),
            detail_url: None,
        }
    }

    fn ids(events: &[NormalizedEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_evening_boundaries() {
        let events = vec![
            create_test_event("a", Some("17:59:00")),
            create_test_event("b", Some("18:00:00")),
            create_test_event("c", Some("21:59:00")),
            create_test_event("d", Some("22:00:00")),
        ];

        let filtered = filter_by_time_of_day(events, TimeOfDay::Evening);
        assert_eq!(ids(&filtered), vec!["b", "c"]);
    }

    #[test]
    fn test_missing_time_is_retained() {
        let events = vec![
            create_test_event("a", None),
            create_test_event("b", Some("TBA")),
            create_test_event("c", Some("09:00:00")),
        ];

        let filtered = filter_by_time_of_day(events, TimeOfDay::Evening);
        assert_eq!(ids(&filtered), vec!["a", "b"]);
    }

    #[test]
    fn test_late_night_wraps() {
        let events = vec![
            create_test_event("a", Some("23:15:00")),
            create_test_event("b", Some("01:00:00")),
            create_test_event("c", Some("06:00:00")),
        ];

        let filtered = filter_by_time_of_day(events, TimeOfDay::LateNight);
        assert_eq!(ids(&filtered), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let events = vec![
            create_test_event("a", Some("08:00:00")),
            create_test_event("b", Some("12:00:00")),
            create_test_event("c", None),
        ];

        let once = filter_by_time_of_day(events, TimeOfDay::Morning);
        let twice = filter_by_time_of_day(once.clone(), TimeOfDay::Morning);
        assert_eq!(once, twice);
    }
}
