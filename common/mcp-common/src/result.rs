//! Tool result helpers
//!
//! Tools return data as text content. Expected failures (a missing file, an
//! HTTP 404 from an upstream API) are still *results*, flagged with
//! `is_error`, so the caller sees the structured error instead of a bare
//! protocol error.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::error::ResultExt;

/// Successful result holding pretty-printed JSON
///
/// ```rust,ignore
/// json_success(&report)
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data).to_mcp_err()?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Error result holding pretty-printed JSON
///
/// The call itself succeeds at the protocol level; `is_error` is set on the
/// result.
pub fn json_error<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data).to_mcp_err()?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

/// Successful plain text result
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_success() {
        let result = json_success(&json!({"name": "repo", "private": true})).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_json_error_sets_flag() {
        let result = json_error(&json!({"error": "HTTP Error 404"})).unwrap();
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_text_success() {
        let result = text_success("hello\n");
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(result.content.len(), 1);
    }
}
