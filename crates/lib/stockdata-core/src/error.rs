use std::{error::Error, fmt};

use serde::Serialize;
use serde_json::Value;

use crate::http::HttpError;
use crate::provider::Payload;

const MAX_BODY_EXCERPT: usize = 256;

/// Provider notices that arrive inside an HTTP 200 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderNotice {
    /// `"Error Message"`: the provider rejected the request (bad symbol, bad function).
    InvalidRequest,
    /// `"Note"`: the request quota was exhausted.
    RateLimited,
    /// `"Information"`: quota or premium-endpoint notice.
    Information,
    /// The provider answered with no data at all.
    EmptyResponse,
}

impl ProviderNotice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::RateLimited => "rate_limited",
            Self::Information => "information",
            Self::EmptyResponse => "empty_response",
        }
    }

    /// Inspects the top level of a provider payload for an embedded notice.
    ///
    /// Only top-level keys are checked; nested objects such as `"Meta Data"`
    /// carry their own `"1. Information"` fields that are regular data.
    #[must_use]
    pub fn detect(payload: &Payload) -> Option<(Self, String)> {
        const FIELDS: [(&str, ProviderNotice); 3] = [
            ("Error Message", ProviderNotice::InvalidRequest),
            ("Note", ProviderNotice::RateLimited),
            ("Information", ProviderNotice::Information),
        ];

        for (field, notice) in FIELDS {
            if let Some(value) = payload.get(field) {
                let message = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                return Some((notice, message));
            }
        }

        if payload.is_empty() {
            return Some((
                Self::EmptyResponse,
                "response body was an empty object".to_string(),
            ));
        }
        None
    }
}

impl fmt::Display for ProviderNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy for a single provider-backed tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    InvalidArgument(String),
    Transport(String),
    UpstreamStatus { status: u16, body: String },
    Parse(String),
    Provider { notice: ProviderNotice, message: String },
}

impl ProviderError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn upstream_status(status: u16, body: &str) -> Self {
        Self::UpstreamStatus {
            status,
            body: excerpt(body),
        }
    }

    pub fn provider(notice: ProviderNotice, message: impl Into<String>) -> Self {
        Self::Provider {
            notice,
            message: message.into(),
        }
    }

    /// Stable snake-case name of the taxonomy entry.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Transport(_) => "transport",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::Parse(_) => "parse",
            Self::Provider { .. } => "provider",
        }
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Transport(message) => write!(f, "provider transport error: {message}"),
            Self::UpstreamStatus { status, body } => {
                if body.is_empty() {
                    write!(f, "provider returned HTTP {status}")
                } else {
                    write!(f, "provider returned HTTP {status}: {body}")
                }
            }
            Self::Parse(message) => write!(f, "failed to parse provider response: {message}"),
            Self::Provider { notice, message } => match notice {
                ProviderNotice::InvalidRequest => write!(f, "provider rejected request: {message}"),
                ProviderNotice::RateLimited => {
                    write!(f, "provider rate limit reached: {message}")
                }
                ProviderNotice::Information => write!(f, "provider notice: {message}"),
                ProviderNotice::EmptyResponse => write!(f, "provider returned no data: {message}"),
            },
        }
    }
}

impl Error for ProviderError {}

impl From<HttpError> for ProviderError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.message().to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_EXCERPT {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
    cut.push_str("...");
    cut
}
