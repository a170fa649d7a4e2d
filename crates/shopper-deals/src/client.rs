//! HTTP client for SerpApi's `search.json` endpoint.
//!
//! Wraps `reqwest` with SerpApi-specific query building, status handling and
//! typed response deserialization for the `google_shopping` engine.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::DealError;
use crate::types::ShoppingSearchResponse;

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

const SEARCH_PATH: &str = "search.json";

/// Query parameters for one `google_shopping` search.
///
/// The locale is pinned to Canada/English and results are restricted to
/// sale-flagged listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingQuery<'a> {
    pub q: &'a str,
    pub location: &'a str,
}

impl ShoppingQuery<'_> {
    fn params(&self) -> [(&str, &str); 6] {
        [
            ("engine", "google_shopping"),
            ("q", self.q),
            ("location", self.location),
            ("gl", "ca"),
            ("hl", "en"),
            ("on_sale", "1"),
        ]
    }
}

/// Client for SerpApi.
///
/// Holds its own `reqwest::Client`; dropping the `SerpApiClient` releases the
/// connection pool. Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpApiClient {
    /// Creates a new client pointed at the production SerpApi host.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, DealError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// `timeout` bounds the whole exchange: connect, send and body read.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DealError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, DealError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("shopper/0.1 (grocery-deals)")
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DealError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one shopping search and returns the parsed response body.
    ///
    /// # Errors
    ///
    /// - [`DealError::Http`] on network failure or timeout.
    /// - [`DealError::Provider`] / [`DealError::UnexpectedStatus`] on a
    ///   non-2xx status.
    /// - [`DealError::Deserialize`] if the body is not the expected JSON shape.
    pub async fn search_shopping(
        &self,
        query: &ShoppingQuery<'_>,
    ) -> Result<ShoppingSearchResponse, DealError> {
        let url = self.build_url(&query.params())?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.status_error(status.as_u16(), &body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DealError::Deserialize {
            context: self.endpoint(),
            source: e,
        })
    }

    /// Builds the request URL with percent-encoded query parameters and the
    /// credential appended last.
    fn build_url(&self, params: &[(&str, &str)]) -> Result<Url, DealError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| DealError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    /// Endpoint without query string, safe to put in messages.
    fn endpoint(&self) -> String {
        format!("{}{SEARCH_PATH}", self.base_url)
    }

    /// Maps a non-2xx response, preferring SerpApi's own `error` message.
    fn status_error(&self, status: u16, body: &str) -> DealError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|m| !m.is_empty());

        match message {
            Some(message) => DealError::Provider { status, message },
            None => DealError::UnexpectedStatus {
                status,
                endpoint: self.endpoint(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SerpApiClient {
        SerpApiClient::with_base_url("test-key", Duration::from_secs(10), base_url)
            .expect("client construction should not fail")
    }

    fn query<'a>(q: &'a str, location: &'a str) -> ShoppingQuery<'a> {
        ShoppingQuery { q, location }
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://serpapi.com");
        let url = client
            .build_url(&query("milk grocery", "Ottawa").params())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search.json?engine=google_shopping&q=milk+grocery\
             &location=Ottawa&gl=ca&hl=en&on_sale=1&api_key=test-key"
        );
    }

    #[test]
    fn build_url_strips_trailing_slashes() {
        let client = test_client("https://serpapi.com//");
        let url = client.build_url(&[]).unwrap();
        assert_eq!(url.as_str(), "https://serpapi.com/search.json?api_key=test-key");
    }

    #[test]
    fn build_url_keeps_base_path() {
        let client = test_client("http://127.0.0.1:9999/proxy");
        let url = client.build_url(&[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9999/proxy/search.json?api_key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_location() {
        let client = test_client("https://serpapi.com");
        let url = client
            .build_url(&query("milk grocery", "K1N, Ottawa, Ontario").params())
            .unwrap();
        assert!(
            url.as_str().contains("location=K1N%2C+Ottawa%2C+Ontario"),
            "location should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SerpApiClient::with_base_url("k", Duration::from_secs(1), "not a url");
        assert!(
            matches!(result, Err(DealError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl"
        );
    }

    #[test]
    fn status_error_prefers_provider_message() {
        let client = test_client("https://serpapi.com");
        let err = client.status_error(401, r#"{"error": "Invalid API key."}"#);
        assert!(
            matches!(err, DealError::Provider { status: 401, ref message } if message == "Invalid API key."),
            "got: {err:?}"
        );
    }

    #[test]
    fn status_error_without_json_names_endpoint_only() {
        let client = test_client("https://serpapi.com");
        let err = client.status_error(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 502 from https://serpapi.com/search.json"
        );
        assert!(!err.to_string().contains("test-key"));
    }
}
