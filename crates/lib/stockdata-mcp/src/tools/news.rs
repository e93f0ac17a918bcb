use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use stockdata_core::control::NewsSentimentRequest;

use crate::{StockDataMcp, helpers};

/// Parameters for the news sentiment feed. Provide tickers, topics, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompanySentimentParams {
    /// Comma-separated tickers, e.g. `AAPL,MSFT`.
    pub tickers: Option<String>,
    /// Comma-separated topics, e.g. `technology,earnings`.
    pub topics: Option<String>,
    /// Start of the window in `YYYYMMDDTHHMM` format.
    pub time_from: Option<String>,
    /// End of the window in `YYYYMMDDTHHMM` format.
    pub time_to: Option<String>,
    /// `LATEST`, `EARLIEST` or `RELEVANCE`.
    pub sort: Option<String>,
    /// Maximum number of articles, 1-1000. Defaults to 20.
    pub limit: Option<u32>,
}

impl From<CompanySentimentParams> for NewsSentimentRequest {
    fn from(params: CompanySentimentParams) -> Self {
        Self {
            tickers: params.tickers,
            topics: params.topics,
            time_from: params.time_from,
            time_to: params.time_to,
            sort: params.sort,
            limit: params.limit,
        }
    }
}

#[tool_router(router = tool_router_news, vis = "pub")]
impl StockDataMcp {
    #[tool(description = "Retrieve market news and sentiment data filtered by tickers and/or topics.")]
    async fn company_sentiment(
        &self,
        Parameters(params): Parameters<CompanySentimentParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = NewsSentimentRequest::from(params);
        let feed = self
            .control
            .company_sentiment(&request)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(feed)?]))
    }
}
