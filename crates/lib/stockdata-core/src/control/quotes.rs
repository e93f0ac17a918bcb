use serde_json::Value;

use crate::error::{ProviderError, ProviderNotice};
use crate::provider::{Payload, ProviderFunction, QueryParams};

use super::{StockControlPlane, require};

const GLOBAL_QUOTE_KEY: &str = "Global Quote";

impl StockControlPlane {
    /// Fetches the latest quote (`GLOBAL_QUOTE`) for a ticker.
    ///
    /// The provider answers unknown symbols with an empty `"Global Quote"`
    /// object; that is reported as an empty-response provider error.
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidArgument` for a blank ticker, otherwise
    /// any adapter error unchanged.
    pub async fn stock_price(&self, ticker: &str) -> Result<Payload, ProviderError> {
        let ticker = require("ticker", ticker)?;
        let params = QueryParams::new().with("symbol", ticker);
        let payload = self.provider.call(ProviderFunction::GlobalQuote, params).await?;

        if payload
            .get(GLOBAL_QUOTE_KEY)
            .and_then(Value::as_object)
            .is_some_and(serde_json::Map::is_empty)
        {
            return Err(ProviderError::provider(
                ProviderNotice::EmptyResponse,
                format!("no quote found for {ticker}"),
            ));
        }
        Ok(payload)
    }

    /// Fetches the monthly OHLCV series (`TIME_SERIES_MONTHLY`) for a ticker.
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidArgument` for a blank ticker, otherwise
    /// any adapter error unchanged.
    pub async fn monthly_history(&self, ticker: &str) -> Result<Payload, ProviderError> {
        let ticker = require("ticker", ticker)?;
        let params = QueryParams::new().with("symbol", ticker);
        self.provider
            .call(ProviderFunction::TimeSeriesMonthly, params)
            .await
    }
}
