use thiserror::Error;

/// Failures raised while looking up a deal.
///
/// None of these escape [`crate::DealLookupService::lookup`]; they are folded
/// into [`crate::LookupResult::Error`] at that boundary.
#[derive(Debug, Error)]
pub enum DealError {
    /// No provider credential was configured.
    #[error("SerpApi key is missing.")]
    MissingCredential,

    #[error("Item name is missing.")]
    MissingItemName,

    /// Network, TLS or timeout failure. The request URL is stripped so the
    /// credential in its query string never reaches a message or log line.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Non-2xx response whose body carried SerpApi's `error` field.
    #[error("SerpApi returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    /// Non-2xx response without a readable provider message.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<reqwest::Error> for DealError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl DealError {
    /// Returns `true` for failures of the outbound call itself: network,
    /// timeout, non-2xx status, or an unreadable body.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Provider { .. }
                | Self::UnexpectedStatus { .. }
                | Self::Deserialize { .. }
        )
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
