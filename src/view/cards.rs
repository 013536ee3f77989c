use crate::models::domain::{parse_time, NormalizedEvent};
use chrono::NaiveDate;

const DATE_TIME_UNAVAILABLE: &str = "Date/Time not available";

/// Message shown in place of result cards
///
/// An empty result and a failed fetch are different situations and are
/// always reported differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoEvents,
    FetchFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoEvents => "No events found in the selected area.",
            Notice::FetchFailed => "Unable to fetch events. Please try again.",
        }
    }
}

/// Display-ready summary of one event
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub event_id: String,
    pub title: String,
    pub when: String,
    pub description: String,
    pub venue: String,
    pub postal_code: String,
    pub detail_url: Option<String>,
}

impl From<&NormalizedEvent> for EventCard {
    fn from(event: &NormalizedEvent) -> Self {
        let venue = [
            event.venue.name.as_str(),
            event.venue.address_line.as_str(),
            event.venue.city.as_str(),
            event.venue.state_code.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            event_id: event.id.clone(),
            title: event.name.clone(),
            when: format_date_time(event.start_date.as_deref(), event.start_time.as_deref()),
            description: event.description.clone(),
            venue,
            postal_code: event.venue.postal_code.clone(),
            detail_url: event.detail_url.clone(),
        }
    }
}

/// Card list surface next to the map
pub trait CardList {
    fn clear(&mut self);

    fn push(&mut self, card: EventCard);

    fn show_notice(&mut self, notice: Notice);
}

/// Human readable start, e.g. `April 12, 2025, 7:30 PM`
pub fn format_date_time(date: Option<&str>, time: Option<&str>) -> String {
    let Some(date) = date.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()) else {
        return DATE_TIME_UNAVAILABLE.to_string();
    };

    match time.and_then(parse_time) {
        Some(time) => date.and_time(time).format("%B %-d, %Y, %-I:%M %p").to_string(),
        None => date.format("%B %-d, %Y").to_string(),
    }
}
