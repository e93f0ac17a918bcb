//! Daemon entry point for the stock data MCP server.
//!
//! Loads configuration from the environment, builds the provider adapter,
//! and serves the MCP protocol over stdio or streamable HTTP.

mod config;
mod logging;

use std::sync::Arc;

use stockdata_core::ProviderClient;
use stockdata_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;

use crate::config::{StockDataConfig, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    let config = StockDataConfig::from_args()?;
    logging::init(&config.log_filter)?;

    info!(
        base_url = %config.provider.base_url(),
        transport = ?config.transport,
        "starting stockdata-mcpd"
    );
    let provider = Arc::new(ProviderClient::with_reqwest(config.provider)?);

    match config.transport {
        Transport::Stdio => serve_stdio(provider).await,
        Transport::Http => {
            let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
                .with_stateful_mode(config.mcp_stateful);
            serve_streamable_http(provider, http_config).await
        }
    }
}
