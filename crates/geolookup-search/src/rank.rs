//! Deterministic ordering of normalized candidates.

use std::cmp::Ordering;

use geolookup_core::{Location, RankMode};

/// Orders `locations` for display.
///
/// Both modes use a stable sort, so candidates with equal keys keep the
/// provider's order and ranking an already-ranked list changes nothing.
///
/// - [`RankMode::Global`]: descending importance.
/// - [`RankMode::LocalityBiased`]: candidates whose city contains `query`
///   (case-insensitive) first, then descending importance within each group.
#[must_use]
pub fn rank(mut locations: Vec<Location>, query: &str, mode: RankMode) -> Vec<Location> {
    match mode {
        RankMode::Global => locations.sort_by(by_importance_desc),
        RankMode::LocalityBiased => {
            let needle = query.trim().to_lowercase();
            locations.sort_by(|a, b| {
                let a_local = city_matches(a, &needle);
                let b_local = city_matches(b, &needle);
                b_local
                    .cmp(&a_local)
                    .then_with(|| by_importance_desc(a, b))
            });
        }
    }
    locations
}

fn by_importance_desc(a: &Location, b: &Location) -> Ordering {
    b.importance.total_cmp(&a.importance)
}

fn city_matches(location: &Location, needle: &str) -> bool {
    location
        .address
        .city
        .as_deref()
        .is_some_and(|city| city.to_lowercase().contains(needle))
}
