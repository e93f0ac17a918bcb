//! MCP tool modules.
//!
//! Tools are grouped by domain: company fundamentals, news sentiment, price
//! data, and contextual help.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

mod context;
pub mod fundamentals;
pub mod news;
pub mod quotes;

/// Parameters for tools keyed by a single ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TickerParams {
    /// Stock ticker symbol, e.g. `IBM` or `AAPL`.
    pub ticker: String,
}
