//! Widget search state and its transitions.
//!
//! [`SearchState::apply`] is a pure function from `(state, event)` to the
//! next state. Only [`crate::SearchController`] feeds it events; everything
//! else reads snapshots.

use geolookup_core::Location;

use crate::error::SearchFailure;

pub(crate) const NO_RESULTS_MESSAGE: &str = "No locations found. Try a different search.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Populated,
    Empty,
    Failed,
}

#[derive(Debug)]
pub enum SearchEvent {
    /// The input text changed. Blank text resets to [`Phase::Idle`].
    InputChanged(String),
    /// The debounced query was too short to send.
    Skipped,
    /// A search tagged with `token` was sent to the provider.
    Dispatched { token: u64 },
    /// The search tagged with `token` finished, ranked or failed.
    Completed {
        token: u64,
        result: Result<Vec<Location>, SearchFailure>,
    },
    /// The user picked a candidate.
    Selected(Location),
    /// Explicit clear action.
    Cleared,
    /// The input regained focus.
    Focused,
    /// The user interacted outside the widget.
    Dismissed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub candidates: Vec<Location>,
    pub loading: bool,
    pub selected: Option<Location>,
    /// Advisory text for empty or failed searches.
    pub error: Option<String>,
    /// Whether the suggestion list is shown.
    pub suggestions_open: bool,
    phase: Phase,
    /// Highest token seen in a `Dispatched` event.
    latest_token: u64,
    /// Token whose completion may still commit, if any.
    awaiting: Option<u64>,
}

impl SearchState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Token of the most recently dispatched search, `0` before the first.
    #[must_use]
    pub fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Candidates to render in the suggestion list, empty while it is closed.
    #[must_use]
    pub fn visible_suggestions(&self) -> &[Location] {
        if self.suggestions_open {
            &self.candidates
        } else {
            &[]
        }
    }

    /// Returns the next state after `event`.
    #[must_use]
    pub fn apply(self, event: SearchEvent) -> Self {
        match event {
            SearchEvent::InputChanged(text) => {
                if text.trim().is_empty() {
                    Self {
                        query: text,
                        latest_token: self.latest_token,
                        ..Self::default()
                    }
                } else {
                    Self {
                        query: text,
                        ..self
                    }
                }
            }
            SearchEvent::Skipped => Self {
                candidates: Vec::new(),
                loading: false,
                error: None,
                suggestions_open: false,
                phase: Phase::Idle,
                awaiting: None,
                ..self
            },
            SearchEvent::Dispatched { token } => {
                if token <= self.latest_token {
                    tracing::debug!(
                        token,
                        latest = self.latest_token,
                        "ignoring out-of-order dispatch"
                    );
                    return self;
                }
                Self {
                    loading: true,
                    error: None,
                    phase: Phase::Searching,
                    latest_token: token,
                    awaiting: Some(token),
                    ..self
                }
            }
            SearchEvent::Completed { token, result } => self.complete(token, result),
            SearchEvent::Selected(location) => {
                let phase = if self.candidates.is_empty() {
                    Phase::Idle
                } else {
                    Phase::Populated
                };
                Self {
                    query: location.label.clone(),
                    selected: Some(location),
                    loading: false,
                    suggestions_open: false,
                    phase,
                    awaiting: None,
                    ..self
                }
            }
            SearchEvent::Cleared => Self {
                latest_token: self.latest_token,
                ..Self::default()
            },
            SearchEvent::Focused => Self {
                suggestions_open: !self.candidates.is_empty(),
                ..self
            },
            SearchEvent::Dismissed => Self {
                suggestions_open: false,
                ..self
            },
        }
    }

    fn complete(self, token: u64, result: Result<Vec<Location>, SearchFailure>) -> Self {
        if self.awaiting != Some(token) {
            tracing::debug!(
                token,
                latest = self.latest_token,
                "discarding stale search response"
            );
            return self;
        }

        let base = Self {
            loading: false,
            awaiting: None,
            ..self
        };

        match result {
            Ok(candidates) if candidates.is_empty() => Self {
                candidates,
                error: Some(NO_RESULTS_MESSAGE.to_string()),
                suggestions_open: false,
                phase: Phase::Empty,
                ..base
            },
            Ok(candidates) => Self {
                candidates,
                error: None,
                suggestions_open: true,
                phase: Phase::Populated,
                ..base
            },
            Err(failure) => {
                tracing::warn!(token, error = %failure, "location search failed");
                Self {
                    candidates: Vec::new(),
                    error: Some(failure.user_message().to_string()),
                    suggestions_open: false,
                    phase: Phase::Failed,
                    ..base
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
