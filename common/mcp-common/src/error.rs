//! Protocol-level error conversion
//!
//! Tools report expected failures as error *results* (see [`crate::json_error`]).
//! The helpers here cover the remaining cases where a protocol error is the
//! only option, such as a result that cannot be serialized.

use rmcp::ErrorData as McpError;

/// Conversion of a local error into an MCP internal error
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

/// Adds `to_mcp_err()` to any `Result` whose error implements [`IntoMcpError`]
///
/// ```rust,ignore
/// let json = serde_json::to_string_pretty(&report).to_mcp_err()?;
/// ```
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}
