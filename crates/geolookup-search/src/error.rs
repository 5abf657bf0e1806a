use std::time::Duration;

use geolookup_nominatim::GeocodeError;
use thiserror::Error;

pub(crate) const SERVER_ERROR_MESSAGE: &str =
    "The location service returned an error. Please try again.";
pub(crate) const CONNECTION_ERROR_MESSAGE: &str =
    "Could not reach the location service. Check your connection and try again.";

/// Why a dispatched search produced no candidates.
#[derive(Debug, Error)]
pub enum SearchFailure {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// The provider did not answer within the controller's request timeout.
    #[error("geocoder did not answer within {0:?}")]
    Timeout(Duration),
}

impl SearchFailure {
    /// Short advisory text for the suggestion list.
    ///
    /// HTTP status failures read as a server problem; everything else as a
    /// connectivity problem.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchFailure::Geocode(GeocodeError::Transport { .. }) => SERVER_ERROR_MESSAGE,
            SearchFailure::Geocode(_) | SearchFailure::Timeout(_) => CONNECTION_ERROR_MESSAGE,
        }
    }
}

/// Failures of the map surface. None of them affect searching.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map surface failed to initialize: {0}")]
    Init(String),

    #[error("map surface failed to place marker: {0}")]
    Render(String),
}
