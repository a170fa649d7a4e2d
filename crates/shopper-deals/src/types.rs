//! Lookup request/result types and the SerpApi wire shapes they map from.

use serde::{Deserialize, Deserializer, Serialize};
use shopper_core::DEFAULT_LOCATION;

/// Literal stamped on every successful result.
pub const DATA_SOURCE: &str = "Live Google Shopping Data";

#[derive(Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub item_name: String,
    pub location: String,
    pub provider_api_key: Option<String>,
}

impl LookupRequest {
    /// Creates a request for `item_name` at [`DEFAULT_LOCATION`] with no credential.
    #[must_use]
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            location: DEFAULT_LOCATION.to_string(),
            provider_api_key: None,
        }
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn api_key(mut self, key: Option<impl Into<String>>) -> Self {
        self.provider_api_key = key.map(Into::into);
        self
    }

    /// Shopping query sent to the provider.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{} grocery", self.item_name)
    }
}

impl std::fmt::Debug for LookupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRequest")
            .field("item_name", &self.item_name)
            .field("location", &self.location)
            .field(
                "provider_api_key",
                &self.provider_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Outcome of a single lookup. Serializes with a `status` discriminator:
/// `"success"`, `"not_found"` or `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    Success(Deal),
    NotFound { message: String },
    Error { message: String },
}

impl LookupResult {
    #[must_use]
    pub fn not_found(item_name: &str) -> Self {
        Self::NotFound {
            message: format!("No sales found for {item_name}."),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Wire value of the `status` field.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::NotFound { .. } => "not_found",
            Self::Error { .. } => "error",
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Top deal, with provider fields passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    pub store: Option<String>,
    pub price: Option<String>,
    pub item: Option<String>,
    pub link: Option<String>,
    pub source: &'static str,
}

impl From<ShoppingResult> for Deal {
    fn from(result: ShoppingResult) -> Self {
        Self {
            store: result.source,
            price: result.price,
            item: result.title,
            link: result.product_link,
            source: DATA_SOURCE,
        }
    }
}

// ---------------------------------------------------------------------------
// SerpApi google_shopping response
// ---------------------------------------------------------------------------

/// Body of `search.json?engine=google_shopping`. Only the fields the lookup
/// reads are modelled; everything else is ignored.
///
/// Listings stay as raw JSON so that only the first one is ever decoded; a
/// malformed entry further down the list cannot fail the lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ShoppingSearchResponse {
    /// `null` and a missing key both land here as `None`.
    #[serde(default)]
    pub shopping_results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ShoppingSearchResponse {
    /// Decodes the first listing in provider order.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the first listing is not a JSON
    /// object.
    pub fn into_top_result(self) -> Result<Option<ShoppingResult>, serde_json::Error> {
        self.shopping_results
            .and_then(|results| results.into_iter().next())
            .map(serde_json::from_value::<ShoppingResult>)
            .transpose()
    }
}

/// One listing. Non-string values in the mapped fields are kept as their JSON
/// text (`3.99` becomes `"3.99"`); `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShoppingResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_link: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
