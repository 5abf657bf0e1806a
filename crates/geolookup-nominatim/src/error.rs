use thiserror::Error;

/// Errors returned by the Nominatim query client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider answered with a non-2xx HTTP status.
    #[error("geocoder returned HTTP {status} for {url}")]
    Transport { status: u16, url: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be deserialized into a candidate list.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeocodeError {
    /// `true` when the request never produced a usable response: connection
    /// failures, timeouts and malformed bodies.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, GeocodeError::Network(_) | GeocodeError::Deserialize { .. })
    }

    /// HTTP status code for [`GeocodeError::Transport`] failures.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GeocodeError::Transport { status, .. } => Some(*status),
            GeocodeError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
