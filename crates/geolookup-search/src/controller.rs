//! Orchestration of the search-and-rank pipeline.
//!
//! [`SearchController`] is the single writer of [`SearchState`]. Input is
//! debounced, each dispatched search is tagged with a monotonically
//! increasing token, and only the response for the latest token commits.
//! Readers (suggestion list, map binding) subscribe to a `watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use geolookup_core::{AppConfig, Location, RankMode};
use geolookup_nominatim::{is_searchable, normalize_batch, Geocoder, SearchOutcome};
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::error::SearchFailure;
use crate::rank::rank;
use crate::state::{SearchEvent, SearchState};

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Quiet period before a typed query is sent.
    pub debounce: Duration,
    /// Upper bound on one provider call; expiry fails the search.
    pub request_timeout: Duration,
    pub rank_mode: RankMode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(400),
            request_timeout: Duration::from_secs(10),
            rank_mode: RankMode::Global,
        }
    }
}

impl ControllerOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            rank_mode: config.rank_mode,
        }
    }
}

struct Pipeline {
    geocoder: Arc<dyn Geocoder>,
    state: watch::Sender<SearchState>,
    next_token: AtomicU64,
    rank_mode: RankMode,
    request_timeout: Duration,
}

impl Pipeline {
    fn apply(&self, event: SearchEvent) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.apply(event);
        });
    }

    async fn run(&self, text: &str) {
        let query = text.trim();
        if !is_searchable(query) {
            self.apply(SearchEvent::Skipped);
            return;
        }

        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(SearchEvent::Dispatched { token });
        tracing::debug!(token, query, "dispatching location search");

        let result =
            match tokio::time::timeout(self.request_timeout, self.geocoder.search(query)).await {
                Ok(Ok(SearchOutcome::Found(raws))) => {
                    Ok(rank(normalize_batch(raws), query, self.rank_mode))
                }
                Ok(Ok(SearchOutcome::Empty)) => Ok(Vec::new()),
                Ok(Ok(SearchOutcome::Skipped)) => {
                    self.apply(SearchEvent::Skipped);
                    return;
                }
                Ok(Err(err)) => {
                    tracing::debug!(
                        token,
                        network = err.is_network(),
                        status = err.status_code(),
                        "geocoder error"
                    );
                    Err(SearchFailure::Geocode(err))
                }
                Err(_elapsed) => Err(SearchFailure::Timeout(self.request_timeout)),
            };

        self.apply(SearchEvent::Completed { token, result });
    }
}

/// Drives [`SearchState`] from user actions and geocoder responses.
///
/// Must be used from within a tokio runtime.
pub struct SearchController {
    pipeline: Arc<Pipeline>,
    debouncer: Debouncer<String>,
}

impl SearchController {
    pub fn new(geocoder: Arc<dyn Geocoder>, options: ControllerOptions) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let pipeline = Arc::new(Pipeline {
            geocoder,
            state,
            next_token: AtomicU64::new(0),
            rank_mode: options.rank_mode,
            request_timeout: options.request_timeout,
        });

        let worker = Arc::clone(&pipeline);
        let debouncer = Debouncer::new(options.debounce, move |text: String| {
            let worker = Arc::clone(&worker);
            async move { worker.run(&text).await }
        });

        Self {
            pipeline,
            debouncer,
        }
    }

    /// Subscribes to state changes. Receivers are read-only.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.pipeline.state.subscribe()
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.pipeline.state.borrow().clone()
    }

    /// The input text changed. Non-blank text schedules a debounced search;
    /// blank text resets to idle immediately.
    pub fn input(&self, text: &str) {
        self.pipeline
            .apply(SearchEvent::InputChanged(text.to_owned()));
        if text.trim().is_empty() {
            self.debouncer.cancel();
        } else {
            self.debouncer.schedule(text.to_owned());
        }
    }

    /// Runs a search for `text` immediately, bypassing the debouncer.
    pub async fn search_now(&self, text: &str) {
        self.pipeline
            .apply(SearchEvent::InputChanged(text.to_owned()));
        self.debouncer.cancel();
        self.pipeline.run(text).await;
    }

    /// Selects the candidate with `id`. Returns the selected location, or
    /// `None` if no current candidate has that id.
    ///
    /// Selection never dispatches a search; a pending debounced search for
    /// earlier input is retired.
    pub fn select(&self, id: &str) -> Option<Location> {
        let location = self
            .pipeline
            .state
            .borrow()
            .candidates
            .iter()
            .find(|c| c.id == id)
            .cloned()?;
        self.commit_selection(location)
    }

    /// Selects the candidate at `index` in the ranked list.
    pub fn select_index(&self, index: usize) -> Option<Location> {
        let location = self
            .pipeline
            .state
            .borrow()
            .candidates
            .get(index)
            .cloned()?;
        self.commit_selection(location)
    }

    fn commit_selection(&self, location: Location) -> Option<Location> {
        self.debouncer.cancel();
        tracing::info!(id = %location.id, label = %location.label, "location selected");
        self.pipeline
            .apply(SearchEvent::Selected(location.clone()));
        Some(location)
    }

    /// Explicit clear action: back to idle from any state.
    pub fn clear(&self) {
        self.debouncer.cancel();
        self.pipeline.apply(SearchEvent::Cleared);
    }

    pub fn focus(&self) {
        self.pipeline.apply(SearchEvent::Focused);
    }

    pub fn dismiss(&self) {
        self.pipeline.apply(SearchEvent::Dismissed);
    }
}
