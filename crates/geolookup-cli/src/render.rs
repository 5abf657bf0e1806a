//! Terminal output: the suggestion list and a text map surface.

use std::fmt::Write as _;
use std::io::Write;

use geolookup_core::Location;
use geolookup_search::{MapError, MapSurface, Marker, Phase, SearchState};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Renders the parts of `state` the suggestion list shows.
pub(crate) fn render_state(state: &SearchState) -> String {
    let mut out = String::new();
    if state.phase() == Phase::Searching {
        let _ = writeln!(out, "searching \"{}\"...", state.query.trim());
    }
    for (n, location) in state.visible_suggestions().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", n + 1, location.label);
    }
    if let Some(message) = &state.error {
        let _ = writeln!(out, "  ! {message}");
    }
    out
}

/// One line per candidate for `--once` output.
pub(crate) fn render_candidate(n: usize, location: &Location) -> String {
    format!(
        "{n:>2}. {label}  ({lat:.5}, {lon:.5})  [{category}/{kind}, importance {importance:.3}]",
        label = location.label,
        lat = location.latitude,
        lon = location.longitude,
        category = location.category,
        kind = location.kind,
        importance = location.importance,
    )
}

/// Prints the suggestion list whenever its rendering changes.
pub(crate) fn spawn_renderer(mut state: watch::Receiver<SearchState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = String::new();
        while state.changed().await.is_ok() {
            let rendered = render_state(&state.borrow_and_update());
            if rendered != last {
                print!("{rendered}");
                let _ = std::io::stdout().flush();
                last = rendered;
            }
        }
    })
}

/// A map surface that prints the marker as text.
pub(crate) struct TerminalMap<W> {
    out: W,
}

impl<W: Write + Send> TerminalMap<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> MapSurface for TerminalMap<W> {
    fn show(&mut self, marker: &Marker) -> Result<(), MapError> {
        writeln!(
            self.out,
            "[map] {} @ {:.5}, {:.5} (zoom {})\n      {}",
            marker.title, marker.latitude, marker.longitude, marker.zoom, marker.body
        )
        .and_then(|()| self.out.flush())
        .map_err(|e| MapError::Render(e.to_string()))
    }

    fn clear_marker(&mut self) {
        if let Err(err) = writeln!(self.out, "[map] marker cleared").and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %err, "failed to clear map marker");
        }
    }

    fn teardown(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use geolookup_core::Address;
    use geolookup_search::SearchEvent;

    use super::*;

    fn loc(id: &str, label: &str) -> Location {
        Location {
            id: id.to_owned(),
            raw_label: label.to_owned(),
            label: label.to_owned(),
            latitude: 39.799_017,
            longitude: -89.643_604,
            kind: "city".to_owned(),
            category: "place".to_owned(),
            importance: 0.61,
            address: Address {
                city: Some("Springfield".to_owned()),
                ..Address::default()
            },
        }
    }

    #[test]
    fn renders_numbered_suggestions() {
        let state = SearchState::default()
            .apply(SearchEvent::InputChanged("spring".to_owned()))
            .apply(SearchEvent::Dispatched { token: 1 })
            .apply(SearchEvent::Completed {
                token: 1,
                result: Ok(vec![loc("1", "Springfield, X"), loc("2", "Springdale, X")]),
            });
        assert_eq!(
            render_state(&state),
            "  1. Springfield, X\n  2. Springdale, X\n"
        );
    }

    #[test]
    fn renders_searching_and_messages() {
        let searching = SearchState::default()
            .apply(SearchEvent::InputChanged(" rivertown ".to_owned()))
            .apply(SearchEvent::Dispatched { token: 1 });
        assert_eq!(render_state(&searching), "searching \"rivertown\"...\n");

        let empty = searching.apply(SearchEvent::Completed {
            token: 1,
            result: Ok(Vec::new()),
        });
        assert!(render_state(&empty).starts_with("  ! "));
    }

    #[test]
    fn idle_state_renders_nothing() {
        assert!(render_state(&SearchState::default()).is_empty());
    }

    #[test]
    fn candidate_line_includes_coordinates() {
        let line = render_candidate(1, &loc("1", "Springfield, X"));
        assert_eq!(
            line,
            " 1. Springfield, X  (39.79902, -89.64360)  [place/city, importance 0.610]"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn terminal_map_reports_write_failures() {
        let mut map = TerminalMap::new(BrokenPipe);
        let err = map
            .show(&Marker::for_location(&loc("1", "Springfield, X")))
            .unwrap_err();
        assert!(matches!(err, MapError::Render(_)));

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || map.clear_marker());

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("failed to clear map marker"));
    }

    #[test]
    fn terminal_map_prints_marker() {
        let mut map = TerminalMap::new(Vec::new());
        map.show(&Marker::for_location(&loc("1", "Springfield, X")))
            .unwrap();
        map.teardown();
        let printed = String::from_utf8(map.into_inner()).unwrap();
        assert_eq!(
            printed,
            "[map] Springfield @ 39.79902, -89.64360 (zoom 15)\n      Springfield, X\n"
        );
    }
}
