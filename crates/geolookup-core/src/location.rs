use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structured address parts of a [`Location`].
///
/// Every field is independently optional. `city` has already been resolved
/// from the provider's city / town / village fields, in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub neighbourhood: Option<String>,
    pub suburb: Option<String>,
    pub city_district: Option<String>,
    pub city: Option<String>,
    pub state_district: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 code as the provider returns it, e.g. `"us"`.
    pub country_code: Option<String>,
    pub postcode: Option<String>,
}

/// A geocoding candidate normalized for ranking, display and map placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Provider place identifier, or `"location_{index}"` when the provider
    /// did not supply one. Unique within a single response only.
    pub id: String,
    /// The provider's unprocessed display string.
    pub raw_label: String,
    /// Composite label built from the structured address parts.
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Provider type tag, e.g. `"house"` or `"city"`.
    pub kind: String,
    /// Provider class tag, e.g. `"building"` or `"place"`. Empty when absent.
    pub category: String,
    pub importance: f64,
    pub address: Address,
}

impl Location {
    /// Returns the best available locality name for popups and headings.
    ///
    /// Falls back from the city through suburb, city district, state and
    /// country.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        let a = &self.address;
        [
            &a.city,
            &a.suburb,
            &a.city_district,
            &a.state,
            &a.country,
        ]
        .into_iter()
        .find_map(|field| field.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// `(latitude, longitude)` pair.
    #[must_use]
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Ordering policy applied to a batch of normalized candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// Descending importance only.
    #[default]
    Global,
    /// Candidates whose city contains the query text first, then importance.
    LocalityBiased,
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMode::Global => write!(f, "global"),
            RankMode::LocalityBiased => write!(f, "locality"),
        }
    }
}

impl FromStr for RankMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(RankMode::Global),
            "locality" | "locality_biased" | "local" => Ok(RankMode::LocalityBiased),
            other => Err(format!(
                "unknown rank mode \"{other}\" (expected \"global\" or \"locality\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_with(address: Address) -> Location {
        Location {
            id: "location_0".to_owned(),
            raw_label: "Somewhere".to_owned(),
            label: "Somewhere".to_owned(),
            latitude: 1.0,
            longitude: 2.0,
            kind: "location".to_owned(),
            category: String::new(),
            importance: 0.0,
            address,
        }
    }

    #[test]
    fn locality_prefers_city() {
        let loc = location_with(Address {
            city: Some("Springfield".to_owned()),
            state: Some("Illinois".to_owned()),
            ..Address::default()
        });
        assert_eq!(loc.locality(), Some("Springfield"));
    }

    #[test]
    fn locality_falls_back_to_suburb_then_state() {
        let suburb = location_with(Address {
            suburb: Some("Eastside".to_owned()),
            state: Some("Illinois".to_owned()),
            ..Address::default()
        });
        assert_eq!(suburb.locality(), Some("Eastside"));

        let state = location_with(Address {
            city: Some("  ".to_owned()),
            state: Some("Illinois".to_owned()),
            ..Address::default()
        });
        assert_eq!(state.locality(), Some("Illinois"));
    }

    #[test]
    fn locality_is_none_without_address() {
        assert_eq!(location_with(Address::default()).locality(), None);
    }

    #[test]
    fn rank_mode_parses_known_values() {
        assert_eq!("global".parse::<RankMode>(), Ok(RankMode::Global));
        assert_eq!("Locality".parse::<RankMode>(), Ok(RankMode::LocalityBiased));
        assert!("nearest".parse::<RankMode>().is_err());
    }

    #[test]
    fn rank_mode_display_round_trips_through_from_str() {
        for mode in [RankMode::Global, RankMode::LocalityBiased] {
            assert_eq!(mode.to_string().parse::<RankMode>(), Ok(mode));
        }
    }

    #[test]
    fn location_serializes_to_json() {
        let loc = location_with(Address::default());
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["id"], "location_0");
        assert_eq!(json["latitude"], 1.0);
    }
}
