//! MCP server implementation for stockdata-mcp.
//!
//! This crate wires the stock control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for fundamentals, news sentiment,
//! quotes and monthly history.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use stockdata_core::{ProviderClient, StockControlPlane};

const SERVER_INSTRUCTIONS: &str = r"stockdata-mcp exposes read-only market data from the Alpha Vantage API.

Tools:
- `company_overview` (ticker): company fundamentals such as sector, market cap, P/E and dividend data.
- `company_sentiment` (tickers and/or topics, optional time_from, time_to, sort, limit): news feed with
  per-article and per-ticker sentiment scores. Times use `YYYYMMDDTHHMM`; sort is LATEST, EARLIEST or
  RELEVANCE; limit is 1-1000 (default 20).
- `get_stock_price` (ticker): latest quote under `Global Quote` (open, high, low, price, volume, change).
- `get_monthly_historical_data` (ticker): monthly OHLCV series keyed by date under `Monthly Time Series`.

Notes:
- Results are the provider's JSON objects, unmodified.
- The free provider tier allows 25 requests per day. Quota notices come back as errors with
  `data.kind = provider` and `data.notice = rate_limited` or `information`.
- Unknown symbols come back as errors with `data.notice = invalid_request` or `empty_response`.
- Use `help` to list commands. `health` returns `ok`.";

/// MCP server wrapper around the stock control plane and tool routers.
#[derive(Clone)]
pub struct StockDataMcp {
    tool_router: ToolRouter<Self>,
    control: StockControlPlane,
}

impl StockDataMcp {
    /// Creates a new server owning the provider adapter.
    #[must_use]
    pub fn new(provider: ProviderClient) -> Self {
        Self::with_provider(Arc::new(provider))
    }

    /// Creates a new server using a shared provider adapter.
    #[must_use]
    pub fn with_provider(provider: Arc<ProviderClient>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_fundamentals()
            + Self::tool_router_news()
            + Self::tool_router_quotes()
            + Self::tool_router_context();
        Self {
            tool_router,
            control: StockControlPlane::with_provider(provider),
        }
    }

    /// Names of every registered tool.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl StockDataMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for StockDataMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
