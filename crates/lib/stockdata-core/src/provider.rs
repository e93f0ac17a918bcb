//! Provider adapter: one parameterized GET per call, JSON object out.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::{ProviderError, ProviderNotice};
use crate::http::{HttpClient, HttpError, HttpRequest, ReqwestHttpClient};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const FUNCTION_PARAM: &str = "function";
const API_KEY_PARAM: &str = "apikey";
const REDACTED: &str = "***REDACTED***";

/// Provider response body, kept opaque.
pub type Payload = Map<String, Value>;

/// Provider functions reachable through the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFunction {
    Overview,
    NewsSentiment,
    GlobalQuote,
    TimeSeriesMonthly,
}

impl ProviderFunction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "OVERVIEW",
            Self::NewsSentiment => "NEWS_SENTIMENT",
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::TimeSeriesMonthly => "TIME_SERIES_MONTHLY",
        }
    }
}

impl fmt::Display for ProviderFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable provider settings, built once at start-up.
#[derive(Clone)]
pub struct ProviderConfig {
    base_url: Url,
    api_key: String,
}

impl ProviderConfig {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &REDACTED)
            .finish()
    }
}

/// Ordered query parameters for one provider call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Adds the pair only when a value is present.
    #[must_use]
    pub fn with_optional(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Provider adapter shared by every tool handler.
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    http: Arc<dyn HttpClient>,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    /// Creates an adapter backed by the reqwest transport.
    ///
    /// # Errors
    /// Returns `HttpError` if the HTTP client cannot be built.
    pub fn with_reqwest(config: ProviderConfig) -> Result<Self, HttpError> {
        Ok(Self::new(config, Arc::new(ReqwestHttpClient::new()?)))
    }

    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Calls a provider function and returns its JSON object.
    ///
    /// The query carries `function` first, then `params` in order, then the
    /// API key. Nothing is retried.
    ///
    /// # Errors
    /// Returns `ProviderError::Transport` when no response arrives,
    /// `UpstreamStatus` for a non-2xx status, `Parse` when the body is not a
    /// JSON object, and `Provider` when the body carries a provider notice.
    pub async fn call(
        &self,
        function: ProviderFunction,
        params: QueryParams,
    ) -> Result<Payload, ProviderError> {
        let span = info_span!(
            "provider_call",
            request_id = %Uuid::new_v4(),
            function = function.as_str()
        );
        self.execute(function, params).instrument(span).await
    }

    async fn execute(
        &self,
        function: ProviderFunction,
        params: QueryParams,
    ) -> Result<Payload, ProviderError> {
        let query = self.build_query(function, params);
        debug!(url = %self.redacted_url(&query), "sending provider request");

        let request = HttpRequest::get(self.config.base_url.as_str()).with_query(query);
        let response = self.http.get(request).await.map_err(|err| {
            let err = ProviderError::Transport(self.scrub(err.message()));
            warn!(error = %err, "provider request failed");
            err
        })?;

        if !response.is_success() {
            warn!(status = response.status, "provider returned non-success status");
            return Err(ProviderError::upstream_status(
                response.status,
                &self.scrub(&response.body),
            ));
        }

        let payload = parse_payload(&response.body).inspect_err(|err| {
            warn!(error = %err, "provider response was not a JSON object");
        })?;

        if let Some((notice, message)) = ProviderNotice::detect(&payload) {
            warn!(%notice, "provider reported a notice");
            return Err(ProviderError::provider(notice, self.scrub(&message)));
        }

        info!(fields = payload.len(), "provider request succeeded");
        Ok(payload)
    }

    fn build_query(&self, function: ProviderFunction, params: QueryParams) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(params.len() + 2);
        query.push((FUNCTION_PARAM.to_string(), function.as_str().to_string()));
        query.extend(
            params
                .pairs
                .into_iter()
                .filter(|(name, _)| name != FUNCTION_PARAM && name != API_KEY_PARAM),
        );
        query.push((API_KEY_PARAM.to_string(), self.config.api_key.clone()));
        query
    }

    fn redacted_url(&self, query: &[(String, String)]) -> String {
        let mut url = self.config.base_url.clone();
        url.query_pairs_mut().extend_pairs(query.iter().map(|(name, value)| {
            if name == API_KEY_PARAM {
                (name.as_str(), REDACTED)
            } else {
                (name.as_str(), value.as_str())
            }
        }));
        url.to_string()
    }

    fn scrub(&self, text: &str) -> String {
        if self.config.api_key.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.config.api_key, REDACTED)
        }
    }
}

impl fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn parse_payload(body: &str) -> Result<Payload, ProviderError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(ProviderError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::{HttpResponse, RecordingHttpClient};

    const KEY: &str = "secret-key";

    fn client_with(http: Arc<RecordingHttpClient>) -> ProviderClient {
        let url = Url::parse("https://provider.test/query").expect("valid url");
        ProviderClient::new(ProviderConfig::new(url, KEY), http)
    }

    #[tokio::test]
    async fn query_starts_with_function_and_ends_with_key() {
        let http = Arc::new(RecordingHttpClient::ok_json(r#"{"Symbol":"IBM"}"#));
        let client = client_with(http.clone());

        let params = QueryParams::new().with("symbol", "IBM");
        client
            .call(ProviderFunction::Overview, params)
            .await
            .expect("call should succeed");

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://provider.test/query");
        assert_eq!(
            request.query,
            vec![
                ("function".to_string(), "OVERVIEW".to_string()),
                ("symbol".to_string(), "IBM".to_string()),
                ("apikey".to_string(), KEY.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn caller_cannot_override_function_or_key() {
        let http = Arc::new(RecordingHttpClient::ok_json(r#"{"ok":true}"#));
        let client = client_with(http.clone());

        let params = QueryParams::new()
            .with("function", "SYMBOL_SEARCH")
            .with("apikey", "other");
        client
            .call(ProviderFunction::GlobalQuote, params)
            .await
            .expect("call should succeed");

        let requests = http.requests();
        let request = &requests[0];
        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query_value("function"), Some("GLOBAL_QUOTE"));
        assert_eq!(request.query_value("apikey"), Some(KEY));
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let http = Arc::new(RecordingHttpClient::replying(HttpResponse::with_status(
            503,
            "Service Unavailable",
        )));
        let client = client_with(http);

        let err = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect_err("503 should fail");

        assert_eq!(
            err,
            ProviderError::UpstreamStatus {
                status: 503,
                body: "Service Unavailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let http = Arc::new(RecordingHttpClient::ok_json("<html>oops</html>"));
        let client = client_with(http);

        let err = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect_err("html should fail");

        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn non_object_json_is_parse_error() {
        let http = Arc::new(RecordingHttpClient::ok_json("[1, 2, 3]"));
        let client = client_with(http);

        let err = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect_err("array should fail");

        assert_eq!(
            err,
            ProviderError::Parse("expected a JSON object, got an array".to_string())
        );
    }

    #[tokio::test]
    async fn transport_errors_never_leak_the_key() {
        let http = Arc::new(RecordingHttpClient::failing(HttpError::new(format!(
            "connection failed for https://provider.test/query?apikey={KEY}"
        ))));
        let client = client_with(http);

        let err = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect_err("transport failure expected");

        assert_eq!(err.kind(), "transport");
        assert!(!err.to_string().contains(KEY));
        assert!(err.to_string().contains(REDACTED));
    }

    #[tokio::test]
    async fn empty_object_is_provider_error() {
        let http = Arc::new(RecordingHttpClient::ok_json("{}"));
        let client = client_with(http);

        let err = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect_err("empty body should fail");

        assert!(matches!(
            err,
            ProviderError::Provider {
                notice: ProviderNotice::EmptyResponse,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn same_body_yields_same_payload() {
        let body = json!({ "Symbol": "IBM", "PERatio": "22.1" }).to_string();
        let http = Arc::new(RecordingHttpClient::ok_json(body));
        let client = client_with(http);

        let first = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect("first call");
        let second = client
            .call(ProviderFunction::Overview, QueryParams::new())
            .await
            .expect("second call");

        assert_eq!(first, second);
        assert_eq!(first.get("PERatio"), Some(&json!("22.1")));
    }

    #[test]
    fn redacted_url_hides_the_key() {
        let client = client_with(Arc::new(RecordingHttpClient::ok_json("{}")));
        let query = client.build_query(
            ProviderFunction::GlobalQuote,
            QueryParams::new().with("symbol", "AAPL"),
        );

        let url = client.redacted_url(&query);
        assert!(!url.contains(KEY));
        assert!(url.contains("function=GLOBAL_QUOTE"));
        assert!(url.contains("symbol=AAPL"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let client = client_with(Arc::new(RecordingHttpClient::ok_json("{}")));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains(KEY));
    }
}
