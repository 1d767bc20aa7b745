//! Terminal MCP Library
//!
//! Workspace shell execution and GitHub repository operations exposed as
//! MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use terminal_mcp::{Config, TerminalMcpServer};
//!
//! let server = TerminalMcpServer::with_config(Config::load()?)?;
//! // Serve via stdio or an in-memory transport
//! ```
//!
//! # Tools
//! - `run_command`: shell command in the workspace directory
//! - `github_create_repository`, `github_add_collaborator`,
//!   `github_get_repository`, `github_get_pull_requests`,
//!   `github_delete_repository`, `github_merge_pull_request`
//! - `github_push_file`: recursive create-or-update of local files

pub mod config;
pub mod executor;
pub mod github;
pub mod handlers;
pub mod params;
pub mod publish;
pub mod server;
pub mod types;

// Re-export main server type
pub use config::Config;
pub use server::TerminalMcpServer;

// Re-export parameter types for direct API usage
pub use params::*;
