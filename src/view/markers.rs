use crate::models::NormalizedEvent;

/// What the map provider needs to draw one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
}

impl From<&NormalizedEvent> for MarkerDescriptor {
    fn from(event: &NormalizedEvent) -> Self {
        Self {
            lat: event.location.latitude,
            lng: event.location.longitude,
            title: event.name.clone(),
        }
    }
}

/// Map rendering provider
///
/// The synchronizer only creates and removes markers and asks for a
/// viewport; drawing is entirely the provider's business.
pub trait MapProvider {
    /// Handle identifying a drawn marker
    type Handle;

    fn add_marker(&mut self, marker: &MarkerDescriptor) -> Self::Handle;

    fn remove_marker(&mut self, handle: Self::Handle);

    /// Move the viewport so `bounds` is visible (x = longitude, y = latitude)
    fn fit_bounds(&mut self, bounds: geo::Rect<f64>);
}

/// Markers currently on the map, in insertion order
#[derive(Debug)]
pub struct MarkerSet<H> {
    entries: Vec<(String, H)>,
}

impl<H> MarkerSet<H> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, event_id: String, handle: H) {
        self.entries.push((event_id, handle));
    }

    /// Event ids in insertion order
    pub fn event_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Remove every entry, yielding the handles for disposal
    pub fn take_handles(&mut self) -> impl Iterator<Item = H> {
        std::mem::take(&mut self.entries)
            .into_iter()
            .map(|(_, handle)| handle)
    }
}

impl<H> Default for MarkerSet<H> {
    fn default() -> Self {
        Self::new()
    }
}
