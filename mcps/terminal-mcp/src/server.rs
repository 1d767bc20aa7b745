//! MCP Server implementation for workspace commands and GitHub operations
//!
//! Tool names are part of the wire contract with existing clients and keep
//! their `github_` prefix. Handler implementations are in the handlers module.

use std::sync::Arc;

use mcp_common::{CallToolResult, McpError};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::handlers;
use crate::params::*;

/// The Terminal MCP Server
#[derive(Clone)]
pub struct TerminalMcpServer {
    config: Arc<Config>,
    github: GitHubClient,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl TerminalMcpServer {
    /// Create a server from `.env`, the config file and the environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::with_config(Config::load()?)
    }

    /// Create a server with explicit config
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        let github = GitHubClient::new(&config.github)?;

        Ok(Self {
            config: Arc::new(config),
            github,
            tool_router: Self::tool_router(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[tool(description = "Run a shell command inside the workspace directory. \
                          Returns stdout, or stderr when stdout is empty.")]
    async fn run_command(
        &self,
        Parameters(params): Parameters<RunCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::run_command(&self.config, params).await
    }

    #[tool(description = "Create a new GitHub repository for the authenticated user")]
    async fn github_create_repository(
        &self,
        Parameters(params): Parameters<CreateRepositoryParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_repository(&self.github, params).await
    }

    #[tool(description = "Add a collaborator to a GitHub repository")]
    async fn github_add_collaborator(
        &self,
        Parameters(params): Parameters<AddCollaboratorParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_collaborator(&self.github, params).await
    }

    #[tool(description = "Push a file or directory from the project to GitHub, preserving \
                          its structure. Paths are relative to the project root.")]
    async fn github_push_file(
        &self,
        Parameters(params): Parameters<PushFileParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::push_file(&self.github, &self.config, params).await
    }

    #[tool(description = "Get details of a GitHub repository")]
    async fn github_get_repository(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_repository(&self.github, params).await
    }

    #[tool(description = "Get open pull requests for a GitHub repository")]
    async fn github_get_pull_requests(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_pull_requests(&self.github, params).await
    }

    #[tool(description = "Delete a GitHub repository. Requires admin permissions on it.")]
    async fn github_delete_repository(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_repository(&self.github, params).await
    }

    #[tool(description = "Merge a pull request")]
    async fn github_merge_pull_request(
        &self,
        Parameters(params): Parameters<MergePullRequestParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::merge_pull_request(&self.github, params).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for TerminalMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Workspace shell and GitHub MCP server. \
                 run_command executes in a fixed workspace directory; \
                 github_* tools call the GitHub REST API with the configured token."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
