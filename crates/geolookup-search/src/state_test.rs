use std::time::Duration;

use geolookup_core::{Address, Location};
use geolookup_nominatim::GeocodeError;

use super::*;
use crate::error::{CONNECTION_ERROR_MESSAGE, SERVER_ERROR_MESSAGE};

fn loc(id: &str, label: &str) -> Location {
    Location {
        id: id.to_owned(),
        raw_label: label.to_owned(),
        label: label.to_owned(),
        latitude: 1.0,
        longitude: 2.0,
        kind: "city".to_owned(),
        category: "place".to_owned(),
        importance: 0.5,
        address: Address::default(),
    }
}

fn populated() -> SearchState {
    SearchState::default()
        .apply(SearchEvent::InputChanged("spring".to_owned()))
        .apply(SearchEvent::Dispatched { token: 1 })
        .apply(SearchEvent::Completed {
            token: 1,
            result: Ok(vec![loc("1", "Springfield"), loc("2", "Springdale")]),
        })
}

#[test]
fn initial_state_is_idle() {
    let state = SearchState::default();
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.query.is_empty());
    assert!(state.candidates.is_empty());
    assert!(!state.loading);
    assert!(state.selected.is_none());
    assert!(state.error.is_none());
}

#[test]
fn dispatch_enters_searching_and_clears_error() {
    let state = SearchState::default()
        .apply(SearchEvent::InputChanged("zz".to_owned()))
        .apply(SearchEvent::Dispatched { token: 1 })
        .apply(SearchEvent::Completed {
            token: 1,
            result: Ok(Vec::new()),
        })
        .apply(SearchEvent::InputChanged("zzz".to_owned()))
        .apply(SearchEvent::Dispatched { token: 2 });
    assert_eq!(state.phase(), Phase::Searching);
    assert!(state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.latest_token(), 2);
}

#[test]
fn non_empty_result_populates() {
    let state = populated();
    assert_eq!(state.phase(), Phase::Populated);
    assert!(!state.loading);
    assert_eq!(state.candidates.len(), 2);
    assert!(state.error.is_none());
    assert!(state.suggestions_open);
    assert_eq!(state.visible_suggestions().len(), 2);
}

#[test]
fn empty_result_sets_no_results_message() {
    let state = SearchState::default()
        .apply(SearchEvent::InputChanged("qqqq".to_owned()))
        .apply(SearchEvent::Dispatched { token: 1 })
        .apply(SearchEvent::Completed {
            token: 1,
            result: Ok(Vec::new()),
        });
    assert_eq!(state.phase(), Phase::Empty);
    assert!(!state.loading);
    assert!(state.candidates.is_empty());
    assert_eq!(state.error.as_deref(), Some(NO_RESULTS_MESSAGE));
}

#[test]
fn transport_failure_sets_server_message_and_clears_candidates() {
    let state = populated()
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 2,
            result: Err(SearchFailure::Geocode(GeocodeError::Transport {
                status: 502,
                url: "http://localhost/search".to_owned(),
            })),
        });
    assert_eq!(state.phase(), Phase::Failed);
    assert!(!state.loading);
    assert!(state.candidates.is_empty());
    assert_eq!(state.error.as_deref(), Some(SERVER_ERROR_MESSAGE));
}

#[test]
fn timeout_sets_connection_message() {
    let state = populated()
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 2,
            result: Err(SearchFailure::Timeout(Duration::from_secs(10))),
        });
    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(state.error.as_deref(), Some(CONNECTION_ERROR_MESSAGE));
}

#[test]
fn stale_response_is_discarded() {
    let state = SearchState::default()
        .apply(SearchEvent::InputChanged("sp".to_owned()))
        .apply(SearchEvent::Dispatched { token: 1 })
        .apply(SearchEvent::InputChanged("spring".to_owned()))
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 2,
            result: Ok(vec![loc("b", "Springfield")]),
        })
        .apply(SearchEvent::Completed {
            token: 1,
            result: Ok(vec![loc("a", "Spain")]),
        });
    assert_eq!(state.candidates.len(), 1);
    assert_eq!(state.candidates[0].id, "b");
    assert_eq!(state.phase(), Phase::Populated);
}

#[test]
fn stale_response_does_not_end_newer_search() {
    let state = SearchState::default()
        .apply(SearchEvent::Dispatched { token: 1 })
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 1,
            result: Ok(vec![loc("a", "Spain")]),
        });
    assert!(state.loading);
    assert_eq!(state.phase(), Phase::Searching);
    assert!(state.candidates.is_empty());
}

#[test]
fn out_of_order_dispatch_is_ignored() {
    let state = SearchState::default()
        .apply(SearchEvent::Dispatched { token: 5 })
        .apply(SearchEvent::Dispatched { token: 3 });
    assert_eq!(state.latest_token(), 5);
}

#[test]
fn skipped_returns_to_idle_and_invalidates_in_flight() {
    let state = populated()
        .apply(SearchEvent::InputChanged("springs".to_owned()))
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::InputChanged("s".to_owned()))
        .apply(SearchEvent::Skipped)
        .apply(SearchEvent::Completed {
            token: 2,
            result: Ok(vec![loc("late", "Springs")]),
        });
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.candidates.is_empty());
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert_eq!(state.query, "s");
}

#[test]
fn selecting_sets_selection_and_label() {
    let state = populated();
    let pick = state.candidates[1].clone();
    let state = state.apply(SearchEvent::Selected(pick.clone()));
    assert_eq!(state.selected.as_ref(), Some(&pick));
    assert_eq!(state.query, "Springdale");
    assert!(!state.suggestions_open);
    assert!(state.visible_suggestions().is_empty());
    assert_eq!(state.candidates.len(), 2, "candidates are kept");
    assert_eq!(state.phase(), Phase::Populated);
}

#[test]
fn focus_reopens_suggestions_after_selection() {
    let state = populated();
    let pick = state.candidates[0].clone();
    let state = state
        .apply(SearchEvent::Selected(pick))
        .apply(SearchEvent::Focused);
    assert!(state.suggestions_open);
}

#[test]
fn focus_without_candidates_keeps_list_closed() {
    let state = SearchState::default().apply(SearchEvent::Focused);
    assert!(!state.suggestions_open);
}

#[test]
fn dismiss_closes_suggestions() {
    let state = populated().apply(SearchEvent::Dismissed);
    assert!(!state.suggestions_open);
    assert_eq!(state.candidates.len(), 2);
}

#[test]
fn new_search_does_not_overwrite_selection() {
    let state = populated();
    let pick = state.candidates[0].clone();
    let state = state
        .apply(SearchEvent::Selected(pick.clone()))
        .apply(SearchEvent::InputChanged("rivertown".to_owned()))
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 2,
            result: Ok(vec![loc("r", "Rivertown")]),
        });
    assert_eq!(state.selected, Some(pick));
    assert_eq!(state.candidates[0].id, "r");
}

#[test]
fn clear_resets_from_any_phase() {
    let failed = populated()
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Completed {
            token: 2,
            result: Err(SearchFailure::Timeout(Duration::from_secs(1))),
        });
    let searching = populated().apply(SearchEvent::Dispatched { token: 2 });
    let selected = {
        let state = populated();
        let pick = state.candidates[0].clone();
        state.apply(SearchEvent::Selected(pick))
    };

    for state in [populated(), failed, searching, selected] {
        let cleared = state.apply(SearchEvent::Cleared);
        assert_eq!(cleared.phase(), Phase::Idle);
        assert!(cleared.query.is_empty());
        assert!(cleared.candidates.is_empty());
        assert!(cleared.selected.is_none());
        assert!(cleared.error.is_none());
        assert!(!cleared.loading);
    }
}

#[test]
fn clear_discards_in_flight_response() {
    let state = populated()
        .apply(SearchEvent::Dispatched { token: 2 })
        .apply(SearchEvent::Cleared)
        .apply(SearchEvent::Completed {
            token: 2,
            result: Ok(vec![loc("late", "Late")]),
        });
    assert!(state.candidates.is_empty());
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.latest_token(), 2);
}

#[test]
fn blank_input_resets_to_idle() {
    let state = populated();
    let pick = state.candidates[0].clone();
    let state = state
        .apply(SearchEvent::Selected(pick))
        .apply(SearchEvent::InputChanged("   ".to_owned()));
    assert_eq!(state.phase(), Phase::Idle);
    assert!(state.candidates.is_empty());
    assert!(state.selected.is_none());
    assert!(state.error.is_none());
}
