use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use serde_json::{Value, json};
use stockdata_core::ProviderError;

pub(crate) fn mcp_err(
    code: ErrorCode,
    message: impl Into<Cow<'static, str>>,
    data: Option<Value>,
) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data,
    }
}

/// Maps a provider failure to an MCP error that keeps its taxonomy visible.
pub(crate) fn map_err(err: ProviderError) -> ErrorData {
    let code = if err.is_invalid_argument() {
        ErrorCode::INVALID_PARAMS
    } else {
        ErrorCode::INTERNAL_ERROR
    };
    let data = error_data(&err);
    mcp_err(code, err.to_string(), Some(data))
}

fn error_data(err: &ProviderError) -> Value {
    match err {
        ProviderError::UpstreamStatus { status, .. } => json!({
            "kind": err.kind(),
            "status": status,
        }),
        ProviderError::Provider { notice, .. } => json!({
            "kind": err.kind(),
            "notice": notice.as_str(),
        }),
        _ => json!({ "kind": err.kind() }),
    }
}
