use crate::models::EventsResponse;
use crate::services::FetchFailure;
use crate::view::cards::{CardList, EventCard, Notice};
use crate::view::markers::{MapProvider, MarkerDescriptor, MarkerSet};
use geo::{BoundingRect, MultiPoint, Point};

/// Sequence token handed out per search
///
/// Only [`ViewSynchronizer::begin_search`] creates tokens, so they are
/// strictly increasing within one synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Lifecycle of the most recent search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing searched yet
    Idle,
    /// Request issued; the previous markers and cards are still showing
    Pending { ticket: SearchTicket },
    /// New results rendered
    Settled { ticket: SearchTicket, count: usize },
    /// Fetch failed; previous view left as it was
    Failed { ticket: SearchTicket, message: String },
}

/// What happened to a response handed to [`ViewSynchronizer::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Rendered,
    Failed,
    /// A newer search was started, or this one was already resolved
    Discarded,
}

/// Keeps the map markers and card list in step with the latest search
///
/// Responses may arrive in any order. Only the response for the most
/// recently issued ticket is rendered; anything older is dropped without
/// touching the view. A render replaces the whole view in one pass, so old
/// and new results never show together.
pub struct ViewSynchronizer<M: MapProvider, C: CardList> {
    map: M,
    cards: C,
    markers: MarkerSet<M::Handle>,
    latest_issued: u64,
    last_resolved: u64,
    state: ViewState,
}

impl<M: MapProvider, C: CardList> ViewSynchronizer<M, C> {
    pub fn new(map: M, cards: C) -> Self {
        Self {
            map,
            cards,
            markers: MarkerSet::new(),
            latest_issued: 0,
            last_resolved: 0,
            state: ViewState::Idle,
        }
    }

    /// Register a new search and get its ticket
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest_issued += 1;
        let ticket = SearchTicket(self.latest_issued);
        self.state = ViewState::Pending { ticket };
        tracing::debug!("Search {} pending", ticket.0);
        ticket
    }

    /// Whether a response for `ticket` would still be rendered
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest_issued && ticket.0 > self.last_resolved
    }

    /// Hand over the outcome of the search identified by `ticket`
    pub fn apply(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<EventsResponse, FetchFailure>,
    ) -> ApplyOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale response for search {} (latest {})",
                ticket.0,
                self.latest_issued
            );
            return ApplyOutcome::Discarded;
        }
        self.last_resolved = ticket.0;

        match outcome {
            Ok(response) => {
                let count = self.render(&response);
                self.state = ViewState::Settled { ticket, count };
                ApplyOutcome::Rendered
            }
            Err(failure) => {
                tracing::warn!("Search {} failed: {}", ticket.0, failure);
                self.cards.show_notice(Notice::FetchFailed);
                self.state = ViewState::Failed {
                    ticket,
                    message: failure.to_string(),
                };
                ApplyOutcome::Failed
            }
        }
    }

    /// Remove every marker and card
    pub fn clear(&mut self) {
        for handle in self.markers.take_handles() {
            self.map.remove_marker(handle);
        }
        self.cards.clear();
    }

    fn render(&mut self, response: &EventsResponse) -> usize {
        self.clear();

        let mut points = Vec::with_capacity(response.events.len());
        for event in &response.events {
            let handle = self.map.add_marker(&MarkerDescriptor::from(event));
            self.markers.insert(event.id.clone(), handle);
            self.cards.push(EventCard::from(event));
            points.push(Point::new(event.location.longitude, event.location.latitude));
        }

        match MultiPoint::from(points).bounding_rect() {
            Some(bounds) => self.map.fit_bounds(bounds),
            None => self.cards.show_notice(Notice::NoEvents),
        }

        response.events.len()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn markers(&self) -> &MarkerSet<M::Handle> {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn cards(&self) -> &C {
        &self.cards
    }
}
