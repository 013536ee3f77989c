// Service exports
pub mod events_client;
pub mod ticketmaster;

pub use events_client::{EventsClient, FetchFailure};
pub use ticketmaster::{normalize_events, TicketmasterClient, UpstreamFetchError};
