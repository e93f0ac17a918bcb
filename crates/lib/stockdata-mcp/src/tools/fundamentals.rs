use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};

use super::TickerParams;
use crate::{StockDataMcp, helpers};

#[tool_router(router = tool_router_fundamentals, vis = "pub")]
impl StockDataMcp {
    #[tool(description = "Fetch an overview of a company (sector, market cap, ratios, dividends) using its stock ticker symbol.")]
    async fn company_overview(
        &self,
        Parameters(params): Parameters<TickerParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let overview = self
            .control
            .company_overview(&params.ticker)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(overview)?]))
    }
}
