//! MCP Common - shared plumbing for stdio MCP servers
//!
//! - **Bootstrap**: [`serve_stdio!`] builds a server from its fallible
//!   constructor and serves it over stdin/stdout
//! - **Tracing**: [`init_tracing`] routes logs to stderr
//! - **Results**: helpers that turn data into `CallToolResult` values, for
//!   both successful and error outcomes
//! - **Errors**: conversion of local failures into protocol-level errors
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_error, json_success};
//!
//! mcp_common::serve_stdio!(MyServer, "my_mcp");
//!
//! fn my_tool(&self) -> Result<CallToolResult, McpError> {
//!     match do_work() {
//!         Ok(data) => json_success(&data),
//!         Err(e) => json_error(&e.to_value()),
//!     }
//! }
//! ```

pub mod error;
pub mod init;
pub mod result;

pub use error::{IntoMcpError, ResultExt};
pub use init::init_tracing;
pub use result::{json_error, json_success, text_success};

// Re-export rmcp types that tool implementations need
pub use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
