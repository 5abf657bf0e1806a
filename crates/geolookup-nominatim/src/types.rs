//! Nominatim `/search?format=json` response types.
//!
//! ## Observed shape
//!
//! The body is a JSON array, possibly empty. Each element carries:
//!
//! - `place_id`: numeric. Older deployments and some proxies return it as a
//!   string, so it is accepted as either and kept as text.
//! - `lat` / `lon`: decimal **strings** (`"39.7990175"`), not numbers.
//!   Numbers are accepted as well.
//! - `display_name`: the provider's comma-joined label.
//! - `importance`: float in `0.0..=1.0`; absent on some object types.
//! - `class` / `type`: OSM key and value, e.g. `"place"` / `"city"`.
//! - `address`: only present with `addressdetails=1`. Keys vary by country
//!   and object; settlements show up under exactly one of `city`, `town` or
//!   `village`, and the district level under `city_district` or `district`.
//!
//! Every field is optional here; defaults are applied during normalization.

use serde::{Deserialize, Deserializer};

/// A single candidate as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    #[serde(default, deserialize_with = "lenient_string")]
    pub place_id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub lat: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub lon: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub importance: Option<f64>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default, rename = "class")]
    pub category: Option<String>,

    #[serde(default)]
    pub address: Option<RawAddress>,
}

/// The `address` sub-record requested with `addressdetails=1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub city_district: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub state_district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// Accepts a JSON string or number; anything else (including `null`) is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a JSON number or a numeric string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
