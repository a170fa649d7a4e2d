//! Deal lookup: one SerpApi call, one response transformation.

use std::time::Duration;

use shopper_core::ToolConfig;
use tracing::Instrument;

use crate::client::{SerpApiClient, ShoppingQuery, DEFAULT_BASE_URL};
use crate::error::DealError;
use crate::types::{Deal, LookupRequest, LookupResult};

/// Total time allowed for the provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Finds the top on-sale grocery listing for an item near a location.
///
/// The service itself holds no connection state. Each call builds its own
/// [`SerpApiClient`] and drops it before returning, so concurrent calls share
/// nothing and a cancelled call releases its sockets with the dropped future.
#[derive(Debug, Clone)]
pub struct DealLookupService {
    base_url: String,
    timeout: Duration,
}

impl Default for DealLookupService {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DealLookupService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the service at a different SerpApi-compatible host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Looks up the best deal for `item_name` at `location`, taking the
    /// credential from `config`.
    pub async fn lookup(
        &self,
        item_name: &str,
        location: &str,
        config: &ToolConfig,
    ) -> LookupResult {
        let request = LookupRequest::new(item_name)
            .location(location)
            .api_key(config.serpapi_key());
        self.lookup_request(&request).await
    }

    /// Runs a prepared [`LookupRequest`]. Never fails: every error is logged
    /// and returned as [`LookupResult::Error`].
    pub async fn lookup_request(&self, request: &LookupRequest) -> LookupResult {
        let span = tracing::info_span!(
            "deal_lookup",
            item = %request.item_name,
            location = %request.location,
        );

        async {
            match self.try_lookup(request).await {
                Ok(Some(deal)) => {
                    tracing::debug!(store = ?deal.store, price = ?deal.price, "deal found");
                    LookupResult::Success(deal)
                }
                Ok(None) => {
                    tracing::info!("no sale listings returned");
                    LookupResult::not_found(&request.item_name)
                }
                Err(err) if !err.is_upstream() => {
                    tracing::warn!(error = %err, "lookup not attempted");
                    LookupResult::error(err.to_string())
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        error.detail = ?err,
                        timeout = err.is_timeout(),
                        "deal lookup failed"
                    );
                    LookupResult::error(err.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_lookup(&self, request: &LookupRequest) -> Result<Option<Deal>, DealError> {
        let api_key = request
            .provider_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(DealError::MissingCredential)?;

        if request.item_name.trim().is_empty() {
            return Err(DealError::MissingItemName);
        }

        let q = request.query();
        let query = ShoppingQuery {
            q: &q,
            location: &request.location,
        };

        let client = SerpApiClient::with_base_url(api_key, self.timeout, &self.base_url)?;
        let response = client.search_shopping(&query).await?;
        drop(client);

        if let Some(note) = response.error.as_deref() {
            tracing::debug!(provider_note = note, "provider attached a message");
        }
        let top = response
            .into_top_result()
            .map_err(|e| DealError::Deserialize {
                context: "shopping_results[0]".to_string(),
                source: e,
            })?;
        Ok(top.map(Deal::from))
    }
}

/// Looks up a deal against the production SerpApi endpoint with the default
/// 10-second timeout.
pub async fn lookup(item_name: &str, location: &str, config: &ToolConfig) -> LookupResult {
    DealLookupService::new()
        .lookup(item_name, location, config)
        .await
}
