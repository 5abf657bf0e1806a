//! HTTP client for the Nominatim `/search` endpoint.
//!
//! Sends one free-text lookup per call and returns the raw candidate list.
//! Short queries are answered locally with [`SearchOutcome::Skipped`] and
//! never reach the provider.

use std::time::Duration;

use async_trait::async_trait;
use geolookup_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::RawCandidate;

/// Queries shorter than this many characters (after trimming) are not sent.
pub const MIN_QUERY_CHARS: usize = 2;

const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Returns `true` when `text` is long enough to be sent to the provider.
#[must_use]
pub fn is_searchable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Result of a lookup that did not fail.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The query was too short; no request was made.
    Skipped,
    /// The provider answered with an empty list.
    Empty,
    /// Candidates in provider order.
    Found(Vec<RawCandidate>),
}

/// A forward geocoder. Implementations must not hold search state; the
/// caller owns every state transition around a lookup.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, text: &str) -> Result<SearchOutcome, GeocodeError>;
}

/// Client for a Nominatim-compatible provider.
///
/// Use [`NominatimClient::new`] for configured production use or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    language: String,
    limit: u32,
}

impl NominatimClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if the
    /// configured provider URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, GeocodeError> {
        let client = Self::with_base_url(
            &config.provider_url,
            &config.user_agent,
            &config.language,
            config.request_timeout_secs,
        )?;
        Ok(client.with_limit(config.result_limit))
    }

    /// Creates a client with an explicit base URL, client identifier and
    /// language hint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        language: &str,
        timeout_secs: u64,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment of deployments mounted under a prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_url,
            language: language.to_owned(),
            limit: DEFAULT_RESULT_LIMIT,
        })
    }

    /// Overrides the result cap sent as `limit`.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", &self.limit.to_string())
            .append_pair("addressdetails", "1")
            .append_pair("extratags", "1")
            .append_pair("dedupe", "1")
            .append_pair("polygon_geojson", "0");
        url
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    /// Looks up `text` against the provider.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Transport`] on a non-2xx status.
    /// - [`GeocodeError::Network`] on connection failure or timeout.
    /// - [`GeocodeError::Deserialize`] if the body is not a candidate array.
    async fn search(&self, text: &str) -> Result<SearchOutcome, GeocodeError> {
        let query = text.trim();
        if !is_searchable(query) {
            return Ok(SearchOutcome::Skipped);
        }

        let url = self.build_url(query);
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Transport {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let candidates: Vec<RawCandidate> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        tracing::debug!(query, count = candidates.len(), "geocoder responded");

        if candidates.is_empty() {
            Ok(SearchOutcome::Empty)
        } else {
            Ok(SearchOutcome::Found(candidates))
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
