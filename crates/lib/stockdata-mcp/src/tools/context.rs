use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::StockDataMcp;

/// Payload listing the MCP commands.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands of this server.".to_string(),
                "health - Health check, returns ok.".to_string(),
                "company_overview - Company fundamentals for a ticker.".to_string(),
                "company_sentiment - News and sentiment feed filtered by tickers and/or topics."
                    .to_string(),
                "get_stock_price - Latest quote for a ticker.".to_string(),
                "get_monthly_historical_data - Monthly OHLCV series for a ticker.".to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl StockDataMcp {
    #[tool(description = "List the MCP commands of this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{json_content, server_replying};

    #[tokio::test]
    async fn help_lists_every_data_tool() {
        let server = server_replying("{}");
        let result = server.help().await.expect("help should succeed");

        let commands = json_content(&result)["commands"].to_string();
        for name in [
            "company_overview",
            "company_sentiment",
            "get_stock_price",
            "get_monthly_historical_data",
        ] {
            assert!(commands.contains(name), "help should mention {name}");
        }
    }
}
