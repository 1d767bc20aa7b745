//! Terminal MCP - workspace shell and GitHub operations over stdio
//!
//! Configure with `GITHUB_TOKEN` (optionally from a local `.env`) and
//! `TERMINAL_WORKSPACE`. Logs go to stderr; stdout carries the protocol.

use terminal_mcp::TerminalMcpServer;

mcp_common::serve_stdio!(TerminalMcpServer, "terminal_mcp");
