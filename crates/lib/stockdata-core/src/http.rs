//! HTTP transport seam for provider calls.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;

const USER_AGENT: &str = concat!("stockdata-mcp/", env!("CARGO_PKG_VERSION"));
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound GET request: base URL plus ordered query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Looks up the first query value for `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract used by the provider adapter.
pub trait HttpClient: Send + Sync {
    fn get(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, HttpError>>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Builds a client with the crate user agent and a 30 second timeout.
    ///
    /// # Errors
    /// Returns `HttpError` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(CLIENT_TIMEOUT)
            .build()
            .map_err(|err| HttpError::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, HttpError>> {
        Box::pin(async move {
            // reqwest errors embed the request URL, which carries the API key.
            let response = self
                .client
                .get(&request.url)
                .query(&request.query)
                .send()
                .await
                .map_err(|err| {
                    let err = err.without_url();
                    if err.is_timeout() {
                        HttpError::new(format!("request timed out: {err}"))
                    } else if err.is_connect() {
                        HttpError::new(format!("connection failed: {err}"))
                    } else {
                        HttpError::new(format!("request failed: {err}"))
                    }
                })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|err| {
                HttpError::new(format!(
                    "failed to read response body: {}",
                    err.without_url()
                ))
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}

/// Offline transport that replays one canned result and records every request.
#[derive(Debug)]
pub struct RecordingHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    #[must_use]
    pub const fn replying(response: HttpResponse) -> Self {
        Self {
            response: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::replying(HttpResponse::ok_json(body))
    }

    #[must_use]
    pub const fn failing(error: HttpError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, HttpError>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}
