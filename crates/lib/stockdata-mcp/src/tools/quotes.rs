use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};

use super::TickerParams;
use crate::{StockDataMcp, helpers};

#[tool_router(router = tool_router_quotes, vis = "pub")]
impl StockDataMcp {
    #[tool(description = "Retrieve the current global quote (latest stock price, volume and change) for a ticker.")]
    async fn get_stock_price(
        &self,
        Parameters(params): Parameters<TickerParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let quote = self
            .control
            .stock_price(&params.ticker)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(quote)?]))
    }

    #[tool(description = "Fetch monthly historical stock data (open, high, low, close, volume per month) for a ticker.")]
    async fn get_monthly_historical_data(
        &self,
        Parameters(params): Parameters<TickerParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let history = self
            .control
            .monthly_history(&params.ticker)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(history)?]))
    }
}
