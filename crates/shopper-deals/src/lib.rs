pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::{SerpApiClient, ShoppingQuery};
pub use error::DealError;
pub use service::{lookup, DealLookupService, DEFAULT_TIMEOUT};
pub use types::{
    Deal, LookupRequest, LookupResult, ShoppingResult, ShoppingSearchResponse, DATA_SOURCE,
};
