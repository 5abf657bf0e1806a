//! Binding between the selection and a map surface.

use geolookup_core::Location;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::MapError;
use crate::state::SearchState;

/// Zoom level used when centering on a selected location.
pub const SELECTED_ZOOM: u8 = 15;

const FALLBACK_TITLE: &str = "Selected location";

/// A single marker with a popup, centered on by the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub title: String,
    pub body: String,
}

impl Marker {
    #[must_use]
    pub fn for_location(location: &Location) -> Self {
        let title = location
            .locality()
            .map_or_else(|| FALLBACK_TITLE.to_owned(), str::to_owned);
        let (latitude, longitude) = location.coordinates();
        Self {
            latitude,
            longitude,
            zoom: SELECTED_ZOOM,
            title,
            body: location.label.clone(),
        }
    }
}

/// Something that can display one marker at a time.
pub trait MapSurface: Send {
    /// Replaces the current marker with `marker` and centers on it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Render`] if the marker could not be placed.
    fn show(&mut self, marker: &Marker) -> Result<(), MapError>;

    /// Removes the current marker, if any.
    fn clear_marker(&mut self) {}

    fn teardown(&mut self);
}

/// Initializes a surface with `init` and keeps it in sync with
/// `SearchState::selected` until the state channel closes.
///
/// Returns `None` when initialization fails; the failure is logged and the
/// search pipeline is unaffected.
pub fn spawn_map_binding<S, F>(
    mut state: watch::Receiver<SearchState>,
    init: F,
) -> Option<JoinHandle<()>>
where
    S: MapSurface + 'static,
    F: FnOnce() -> Result<S, MapError>,
{
    let mut surface = match init() {
        Ok(surface) => surface,
        Err(err) => {
            tracing::warn!(error = %err, "map unavailable, continuing without it");
            return None;
        }
    };

    Some(tokio::spawn(async move {
        let mut shown: Option<Location> = None;
        loop {
            let selected = state.borrow_and_update().selected.clone();
            if selected != shown {
                sync_surface(&mut surface, selected.as_ref());
                shown = selected;
            }
            if state.changed().await.is_err() {
                break;
            }
        }
        surface.teardown();
        tracing::debug!("map binding stopped");
    }))
}

fn sync_surface<S: MapSurface>(surface: &mut S, selected: Option<&Location>) {
    match selected {
        Some(location) => {
            let marker = Marker::for_location(location);
            if let Err(err) = surface.show(&marker) {
                tracing::warn!(id = %location.id, error = %err, "failed to show selected location");
            }
        }
        None => surface.clear_marker(),
    }
}
