//! Web-search-backed retrieval clients
//!
//! Hotel and attraction candidates come from the Tavily search API; both
//! searchers share one thin transport and the rating scraper, and layer
//! their own query construction and result parsing on top.

pub mod attractions;
pub mod hotels;

pub use attractions::AttractionSearcher;
pub use hotels::HotelSearcher;

use crate::config::SearchConfig;
use crate::error::PlannerError;
use crate::Result;
use regex::Regex;
use reqwest::blocking::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d)?)\s*/\s*5").expect("valid rating regex"));

/// Extract a "4.5 / 5" style rating from free text
#[must_use]
pub(crate) fn extract_rating(text: &str) -> Option<f64> {
    RATING_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Tavily search wire format
pub(crate) mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct Request<'a> {
        pub query: &'a str,
        pub search_depth: &'a str,
        pub include_answer: bool,
        pub include_domains: &'a [&'a str],
        pub max_results: u32,
        pub include_raw_content: bool,
    }

    #[derive(Debug, Deserialize)]
    pub struct Response {
        #[serde(default)]
        pub results: Vec<SearchResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchResult {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub content: String,
        pub url: Option<String>,
        pub source: Option<String>,
    }
}

/// Shared blocking transport for Tavily searches
#[derive(Debug)]
pub(crate) struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TavilyClient {
    /// Create a transport from search configuration
    ///
    /// The API key must be present; it is passed explicitly rather than read
    /// from process-wide state.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PlannerError::config(
                    "Search API key is required. Set search.api_key in your config.",
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripweaver/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Run one search request; single attempt, no retry
    pub fn search(
        &self,
        query: &str,
        include_domains: &[&str],
        max_results: u32,
    ) -> Result<Vec<wire::SearchResult>> {
        debug!(query, max_results, "Tavily search request");

        let request = wire::Request {
            query,
            search_depth: "advanced",
            include_answer: true,
            include_domains,
            max_results,
            include_raw_content: true,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| PlannerError::retrieval(format!("API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::retrieval(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body: wire::Response = response
            .json()
            .map_err(|e| PlannerError::retrieval(format!("Failed to parse search response: {e}")))?;

        info!(results = body.results.len(), "Tavily search completed");
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_rating() {
        assert_eq!(extract_rating("Rated 4.5 / 5 by guests"), Some(4.5));
        assert_eq!(extract_rating("score: 4/5"), Some(4.0));
        assert_eq!(extract_rating("no rating here"), None);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = SearchConfig::default();
        let err = TavilyClient::new(&config).unwrap_err();
        assert!(matches!(err, PlannerError::Config { .. }));
    }

    #[test]
    fn test_client_trims_api_key() {
        let config = SearchConfig {
            api_key: Some("  tvly-key  ".to_string()),
            ..SearchConfig::default()
        };
        let client = TavilyClient::new(&config).unwrap();
        assert_eq!(client.api_key, "tvly-key");
    }

    #[test]
    fn test_response_defaults_to_empty_results() {
        let parsed: wire::Response = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
