//! Parameter types for terminal MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_private() -> bool {
    true
}

fn default_permission() -> String {
    "push".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunCommandParams {
    #[schemars(description = "Shell command to run inside the workspace directory")]
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateRepositoryParams {
    #[schemars(description = "Repository name")]
    pub name: String,

    #[schemars(description = "Create a private repository (default: true)")]
    #[serde(default = "default_private")]
    pub private: bool,

    #[schemars(description = "Short repository description")]
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCollaboratorParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "GitHub username to invite")]
    pub username: String,

    #[schemars(description = "Permission level: pull, triage, push, maintain or admin (default: push)")]
    #[serde(default = "default_permission")]
    pub permission: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PushFileParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(
        description = "File or directory relative to the project root (the workspace's parent), e.g. 'servers/terminal_server' or 'README.md'"
    )]
    pub project_path: String,

    #[schemars(description = "Commit message used for every file")]
    pub commit_message: String,

    #[schemars(description = "Target branch (default: main)")]
    #[serde(default = "default_branch")]
    pub branch: String,
}

/// Owner/name pair shared by the read and delete tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RepoParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MergePullRequestParams {
    #[schemars(description = "Repository owner (user or organization)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,

    #[schemars(description = "Pull request number")]
    pub pr_number: u64,
}
