//! Client-side view state: map markers and result cards
//!
//! Renderer-agnostic. A map provider and a card list are plugged in through
//! [`MapProvider`] and [`CardList`].

pub mod cards;
pub mod markers;
pub mod synchronizer;

pub use cards::{format_date_time, CardList, EventCard, Notice};
pub use markers::{MapProvider, MarkerDescriptor, MarkerSet};
pub use synchronizer::{ApplyOutcome, SearchTicket, ViewState, ViewSynchronizer};
