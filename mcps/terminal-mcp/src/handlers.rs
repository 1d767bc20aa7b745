//! Tool handlers
//!
//! Each handler calls into the executor, the GitHub client or the publisher
//! and turns the outcome into a tool result. Failures become error results
//! carrying a structured JSON object; the only protocol-level error left is
//! a result that cannot be serialized.

use mcp_common::{json_error, json_success, text_success, CallToolResult, McpError};
use tracing::warn;

use crate::config::Config;
use crate::executor;
use crate::github::{ApiResponse, GitHubClient, GitHubError, GitHubResult};
use crate::params::*;
use crate::publish::{self, PushRequest};

// ============================================================================
// Helper Functions
// ============================================================================

fn github_error(err: GitHubError) -> Result<CallToolResult, McpError> {
    warn!(error = %err, "GitHub call failed");
    json_error(&err.to_value())
}

/// GitHub's body is passed through as-is; error statuses flag the result
fn api_result(result: GitHubResult<ApiResponse>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(response) if response.is_success() => json_success(&response.body),
        Ok(response) => {
            warn!(status = response.status, "GitHub returned an error status");
            json_error(&response.body)
        }
        Err(e) => github_error(e),
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

pub async fn run_command(
    config: &Config,
    params: RunCommandParams,
) -> Result<CallToolResult, McpError> {
    let output = executor::run_command(&config.workspace, &params.command).await;
    Ok(text_success(output))
}

pub async fn create_repository(
    client: &GitHubClient,
    params: CreateRepositoryParams,
) -> Result<CallToolResult, McpError> {
    api_result(
        client
            .create_repository(&params.name, params.private, params.description.as_deref())
            .await,
    )
}

pub async fn add_collaborator(
    client: &GitHubClient,
    params: AddCollaboratorParams,
) -> Result<CallToolResult, McpError> {
    api_result(
        client
            .add_collaborator(&params.owner, &params.repo, &params.username, &params.permission)
            .await,
    )
}

pub async fn push_file(
    client: &GitHubClient,
    config: &Config,
    params: PushFileParams,
) -> Result<CallToolResult, McpError> {
    let request = PushRequest {
        owner: &params.owner,
        repo: &params.repo,
        commit_message: &params.commit_message,
        branch: &params.branch,
    };

    match publish::push(client, config.project_root(), &params.project_path, &request).await {
        Ok(report) => json_success(&report),
        Err(e) => {
            warn!(error = %e, "push aborted");
            json_error(&e.to_value())
        }
    }
}

pub async fn get_repository(
    client: &GitHubClient,
    params: RepoParams,
) -> Result<CallToolResult, McpError> {
    api_result(client.get_repository(&params.owner, &params.repo).await)
}

pub async fn get_pull_requests(
    client: &GitHubClient,
    params: RepoParams,
) -> Result<CallToolResult, McpError> {
    api_result(client.get_pull_requests(&params.owner, &params.repo).await)
}

pub async fn delete_repository(
    client: &GitHubClient,
    params: RepoParams,
) -> Result<CallToolResult, McpError> {
    match client.delete_repository(&params.owner, &params.repo).await {
        Ok(value) => json_success(&value),
        Err(e) => github_error(e),
    }
}

pub async fn merge_pull_request(
    client: &GitHubClient,
    params: MergePullRequestParams,
) -> Result<CallToolResult, McpError> {
    api_result(
        client
            .merge_pull_request(&params.owner, &params.repo, params.pr_number)
            .await,
    )
}
