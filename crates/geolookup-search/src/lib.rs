pub mod controller;
pub mod debounce;
pub mod error;
pub mod map;
pub mod rank;
pub mod state;

pub use controller::{ControllerOptions, SearchController};
pub use debounce::Debouncer;
pub use error::{MapError, SearchFailure};
pub use map::{spawn_map_binding, MapSurface, Marker};
pub use rank::rank;
pub use state::{Phase, SearchEvent, SearchState};
