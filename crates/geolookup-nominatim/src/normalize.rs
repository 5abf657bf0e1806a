//! Normalization of Nominatim candidates into [`geolookup_core::Location`].

use geolookup_core::{Address, Location};

use crate::types::{RawAddress, RawCandidate};

const DEFAULT_KIND: &str = "location";

/// Converts a provider candidate into a [`Location`].
///
/// `index` is the candidate's position in the provider response and is only
/// used to synthesize an id when the provider did not send one.
///
/// Returns `None` when either coordinate is missing or does not parse to a
/// finite number.
#[must_use]
pub fn normalize_candidate(raw: RawCandidate, index: usize) -> Option<Location> {
    let latitude = parse_coordinate(raw.lat.as_deref())?;
    let longitude = parse_coordinate(raw.lon.as_deref())?;

    let id = raw
        .place_id
        .filter(|id| is_truthy_id(id))
        .unwrap_or_else(|| format!("location_{index}"));

    let raw_label = raw.display_name.unwrap_or_default();
    let address = raw.address.map(normalize_address).unwrap_or_default();
    let label = build_label(&address).unwrap_or_else(|| raw_label.clone());

    Some(Location {
        id,
        raw_label,
        label,
        latitude,
        longitude,
        kind: raw
            .kind
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_KIND.to_string()),
        category: raw.category.unwrap_or_default(),
        importance: raw.importance.filter(|v| v.is_finite()).unwrap_or(0.0),
        address,
    })
}

/// Normalizes a whole response, dropping candidates without valid coordinates.
///
/// Positional ids use the index in `raws`, so the provider's order must be
/// preserved up to this point.
#[must_use]
pub fn normalize_batch(raws: Vec<RawCandidate>) -> Vec<Location> {
    let total = raws.len();
    let locations: Vec<Location> = raws
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let display_name = raw.display_name.clone();
            let normalized = normalize_candidate(raw, index);
            if normalized.is_none() {
                tracing::debug!(
                    index,
                    display_name = display_name.as_deref().unwrap_or(""),
                    "dropping candidate without finite coordinates"
                );
            }
            normalized
        })
        .collect();

    if locations.len() < total {
        tracing::debug!(
            total,
            kept = locations.len(),
            "filtered candidates with invalid coordinates"
        );
    }
    locations
}

/// Builds the composite label from structured address parts.
///
/// Parts are taken in a fixed order: house number, road, neighbourhood,
/// suburb, city district, city, state district (skipped when equal to the
/// city), state, country, postcode. Empty parts are skipped. Returns `None`
/// when no part is present.
#[must_use]
pub fn build_label(address: &Address) -> Option<String> {
    let city = non_empty(address.city.as_deref());
    let state_district =
        non_empty(address.state_district.as_deref()).filter(|district| Some(*district) != city);

    let parts: Vec<&str> = [
        non_empty(address.house_number.as_deref()),
        non_empty(address.road.as_deref()),
        non_empty(address.neighbourhood.as_deref()),
        non_empty(address.suburb.as_deref()),
        non_empty(address.city_district.as_deref()),
        city,
        state_district,
        non_empty(address.state.as_deref()),
        non_empty(address.country.as_deref()),
        non_empty(address.postcode.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn normalize_address(raw: RawAddress) -> Address {
    Address {
        house_number: raw.house_number,
        road: raw.road,
        neighbourhood: raw.neighbourhood,
        suburb: raw.suburb,
        city_district: first_present([raw.city_district, raw.district]),
        city: first_present([raw.city, raw.town, raw.village]),
        state_district: raw.state_district,
        state: raw.state,
        country: raw.country,
        country_code: raw.country_code,
        postcode: raw.postcode,
    }
}

/// First value that is present and not blank.
fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Parses a coordinate string. Non-finite results (`NaN`, `inf`) are rejected.
fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Rejects ids a provider uses as "no id": empty, `0`, `false`.
fn is_truthy_id(id: &str) -> bool {
    let id = id.trim();
    !(id.is_empty() || id == "0" || id.eq_ignore_ascii_case("false"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
