pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{is_searchable, Geocoder, NominatimClient, SearchOutcome, MIN_QUERY_CHARS};
pub use error::GeocodeError;
pub use normalize::{build_label, normalize_batch, normalize_candidate};
pub use types::{RawAddress, RawCandidate};
