use std::sync::Arc;

use crate::error::ProviderError;
use crate::provider::ProviderClient;

pub mod fundamentals;
pub mod news;
pub mod quotes;

pub use news::{NewsSentimentRequest, NewsSort};

/// Typed entry points for the provider-backed tools.
#[derive(Clone, Debug)]
pub struct StockControlPlane {
    provider: Arc<ProviderClient>,
}

impl StockControlPlane {
    #[must_use]
    pub fn new(provider: ProviderClient) -> Self {
        Self::with_provider(Arc::new(provider))
    }

    #[must_use]
    pub const fn with_provider(provider: Arc<ProviderClient>) -> Self {
        Self { provider }
    }
}

/// Trims a required string input, rejecting blanks.
pub(crate) fn require<'a>(name: &str, value: &'a str) -> Result<&'a str, ProviderError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::invalid_argument(format!("{name} is required")));
    }
    Ok(trimmed)
}

/// Trims an optional string input, treating blanks as absent.
pub(crate) fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
