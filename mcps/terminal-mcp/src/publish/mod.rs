//! Recursive file publisher
//!
//! Pushes a local file or directory tree to a repository through the
//! contents API, one file at a time. Each file is created or updated
//! depending on whether a SHA exists for it on the target branch. A file
//! that fails is recorded and the walk moves on; nothing already published
//! is rolled back.

pub mod plan;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::github::{ContentUpload, GitHubClient, GitHubError};
use crate::types::{PublishError, PushReport, PushResult};

pub use plan::{normalize_remote, PushPlan, PushTarget};

/// Destination and commit details shared by every file of one push
#[derive(Debug, Clone, Copy)]
pub struct PushRequest<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub commit_message: &'a str,
    pub branch: &'a str,
}

/// Why a single file could not be published
#[derive(Error, Debug)]
enum FileError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] GitHubError),

    #[error("response is missing content.html_url")]
    MissingUrl(Value),
}

impl FileError {
    fn details(&self) -> Option<Value> {
        match self {
            FileError::Read(_) => None,
            FileError::Api(e) => e.response_body().cloned(),
            FileError::MissingUrl(body) => Some(body.clone()),
        }
    }
}

/// Publish `project_path` (relative to `project_root`)
///
/// Fails only when the path does not exist or cannot be inspected; per-file
/// failures are part of the returned report.
pub async fn push(
    client: &GitHubClient,
    project_root: &Path,
    project_path: &str,
    request: &PushRequest<'_>,
) -> Result<PushReport, PublishError> {
    let (local, targets) = plan_targets(project_root, project_path).await?;
    info!(
        path = %local.display(),
        files = targets.len(),
        repo = %format!("{}/{}", request.owner, request.repo),
        branch = request.branch,
        "pushing"
    );

    let mut results = Vec::with_capacity(targets.len());
    for target in &targets {
        results.push(publish_file(client, target, request).await);
    }

    let report = PushReport::from_results(results);
    info!(
        success = report.success_count,
        errors = report.error_count,
        "push complete"
    );
    Ok(report)
}

/// Resolve and walk the project path on the blocking pool
async fn plan_targets(
    project_root: &Path,
    project_path: &str,
) -> Result<(PathBuf, Vec<PushTarget>), PublishError> {
    let root = project_root.to_path_buf();
    let relative = project_path.to_string();

    tokio::task::spawn_blocking(move || -> Result<_, PublishError> {
        let plan = PushPlan::resolve(&root, &relative)?;
        let targets: Vec<PushTarget> = plan.targets().collect();
        Ok((plan.local_path().to_path_buf(), targets))
    })
    .await
    .map_err(|e| PublishError::Io {
        path: project_root.join(project_path),
        source: std::io::Error::other(e),
    })?
}

/// Publish one file, folding any failure into an error record
pub async fn publish_file(
    client: &GitHubClient,
    target: &PushTarget,
    request: &PushRequest<'_>,
) -> PushResult {
    match upload(client, target, request).await {
        Ok(html_url) => {
            debug!(path = %target.remote, "published");
            PushResult::Success {
                path: target.remote.clone(),
                html_url,
            }
        }
        Err(e) => {
            warn!(path = %target.remote, error = %e, "publish failed");
            PushResult::Error {
                path: target.remote.clone(),
                error: e.to_string(),
                details: e.details(),
            }
        }
    }
}

async fn upload(
    client: &GitHubClient,
    target: &PushTarget,
    request: &PushRequest<'_>,
) -> Result<String, FileError> {
    let text = tokio::fs::read_to_string(&target.local).await?;

    let sha = client
        .content_sha(request.owner, request.repo, &target.remote, request.branch)
        .await?;

    let payload = ContentUpload::new(request.commit_message, &text, request.branch, sha);
    let response = client
        .put_content(request.owner, request.repo, &target.remote, &payload)
        .await?;

    let html_url = response
        .pointer("/content/html_url")
        .and_then(Value::as_str)
        .map(str::to_owned);
    html_url.ok_or(FileError::MissingUrl(response))
}
