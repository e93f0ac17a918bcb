use crate::error::ProviderError;
use crate::provider::{Payload, ProviderFunction, QueryParams};

use super::{StockControlPlane, require};

impl StockControlPlane {
    /// Fetches company fundamentals (`OVERVIEW`) for a ticker.
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidArgument` for a blank ticker, otherwise
    /// any adapter error unchanged.
    pub async fn company_overview(&self, ticker: &str) -> Result<Payload, ProviderError> {
        let ticker = require("ticker", ticker)?;
        let params = QueryParams::new().with("symbol", ticker);
        self.provider.call(ProviderFunction::Overview, params).await
    }
}
