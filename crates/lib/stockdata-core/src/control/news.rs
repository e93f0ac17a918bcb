use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::ProviderError;
use crate::provider::{Payload, ProviderFunction, QueryParams};

use super::{StockControlPlane, optional};

/// Provider time stamp format for `time_from`/`time_to`.
pub const TIME_FORMAT: &str = "%Y%m%dT%H%M";
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 1000;

/// Article ordering accepted by `NEWS_SENTIMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSort {
    Latest,
    Earliest,
    Relevance,
}

impl NewsSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::Earliest => "EARLIEST",
            Self::Relevance => "RELEVANCE",
        }
    }
}

impl fmt::Display for NewsSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsSort {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LATEST" => Ok(Self::Latest),
            "EARLIEST" => Ok(Self::Earliest),
            "RELEVANCE" => Ok(Self::Relevance),
            other => Err(ProviderError::invalid_argument(format!(
                "sort must be one of LATEST, EARLIEST, RELEVANCE (got {other})"
            ))),
        }
    }
}

/// Filters for the news sentiment feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsSentimentRequest {
    /// Comma-separated tickers, e.g. `AAPL,MSFT` or `CRYPTO:BTC`.
    pub tickers: Option<String>,
    /// Comma-separated topics, e.g. `technology,earnings`.
    pub topics: Option<String>,
    /// Start of the window, `YYYYMMDDTHHMM`.
    pub time_from: Option<String>,
    /// End of the window, `YYYYMMDDTHHMM`.
    pub time_to: Option<String>,
    pub sort: Option<String>,
    /// Maximum number of articles, `1..=1000`; defaults to 20.
    pub limit: Option<u32>,
}

impl NewsSentimentRequest {
    pub fn for_tickers(tickers: impl Into<String>) -> Self {
        Self {
            tickers: Some(tickers.into()),
            ..Self::default()
        }
    }

    pub fn for_topics(topics: impl Into<String>) -> Self {
        Self {
            topics: Some(topics.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time_range(
        mut self,
        time_from: Option<impl Into<String>>,
        time_to: Option<impl Into<String>>,
    ) -> Self {
        self.time_from = time_from.map(Into::into);
        self.time_to = time_to.map(Into::into);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: NewsSort) -> Self {
        self.sort = Some(sort.as_str().to_string());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Validates the filters and maps them to provider query parameters.
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidArgument` when neither tickers nor
    /// topics are given, a time stamp is malformed or out of order, the sort
    /// is unknown, or the limit is out of range.
    pub fn to_params(&self) -> Result<QueryParams, ProviderError> {
        let tickers = optional(self.tickers.as_deref());
        let topics = optional(self.topics.as_deref());
        if tickers.is_none() && topics.is_none() {
            return Err(ProviderError::invalid_argument(
                "tickers or topics is required",
            ));
        }

        let time_from = optional(self.time_from.as_deref());
        let time_to = optional(self.time_to.as_deref());
        let from = time_from.map(|value| parse_time("time_from", value)).transpose()?;
        let to = time_to.map(|value| parse_time("time_to", value)).transpose()?;
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(ProviderError::invalid_argument(
                "time_from must not be later than time_to",
            ));
        }

        let sort = optional(self.sort.as_deref())
            .map(NewsSort::from_str)
            .transpose()?;

        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ProviderError::invalid_argument(format!(
                "limit must be between 1 and {MAX_LIMIT} (got {limit})"
            )));
        }

        Ok(QueryParams::new()
            .with_optional("tickers", tickers)
            .with_optional("topics", topics)
            .with_optional("time_from", time_from)
            .with_optional("time_to", time_to)
            .with_optional("sort", sort.map(NewsSort::as_str))
            .with("limit", limit.to_string()))
    }
}

fn parse_time(name: &str, value: &str) -> Result<NaiveDateTime, ProviderError> {
    NaiveDateTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        ProviderError::invalid_argument(format!(
            "{name} must use the YYYYMMDDTHHMM format (got {value})"
        ))
    })
}

impl StockControlPlane {
    /// Fetches the news and sentiment feed (`NEWS_SENTIMENT`).
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidArgument` when the filters are invalid,
    /// otherwise any adapter error unchanged.
    pub async fn company_sentiment(
        &self,
        request: &NewsSentimentRequest,
    ) -> Result<Payload, ProviderError> {
        let params = request.to_params()?;
        self.provider
            .call(ProviderFunction::NewsSentiment, params)
            .await
    }
}
