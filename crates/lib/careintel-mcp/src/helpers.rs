use std::borrow::Cow;
use std::fmt::Display;

use chrono::{SecondsFormat, Utc};
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde::Serialize;
use serde_json::json;
use tracing::error;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Successful tool result carrying pretty-printed JSON in one text block.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|err| {
        mcp_err(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to serialize tool result: {err}"),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Error tool result describing a failure raised while running `tool`.
pub fn tool_failure(tool: &str, err: &impl Display) -> CallToolResult {
    error!(tool, error = %err, "tool execution failed");
    CallToolResult::error(vec![Content::text(failure_payload(tool, err))])
}

fn failure_payload(tool: &str, err: &impl Display) -> String {
    let payload = json!({
        "error": err.to_string(),
        "tool": tool,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
}
