//! Error types for GitHub REST operations
//!
//! Every client operation returns [`GitHubResult`]. Handlers turn errors into
//! tool results with [`GitHubError::to_value`], so no transport failure
//! escapes as a protocol error.

use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur when talking to the GitHub REST API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token was configured
    #[error("GITHUB_TOKEN is not configured")]
    MissingToken,

    /// The configured base URL cannot be used to build endpoints
    #[error("invalid GitHub API URL: {0}")]
    InvalidUrl(String),

    /// GitHub answered with a 4xx/5xx status
    #[error("HTTP Error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http {
        status: u16,
        message: Option<String>,
        documentation_url: Option<String>,
        /// Raw response body
        body: Value,
    },

    /// DELETE succeeded at the HTTP level but not with 204 No Content
    #[error("Failed to delete repository (HTTP {status})")]
    DeleteFailed { status: u16, details: Value },

    /// Connection, TLS or body-read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body that should have been JSON was not
    #[error("invalid JSON in GitHub response (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl GitHubError {
    /// Build an [`GitHubError::Http`] from a parsed error body
    pub fn from_body(status: u16, body: Value) -> Self {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_owned);
        GitHubError::Http {
            status,
            message: field("message"),
            documentation_url: field("documentation_url"),
            body,
        }
    }

    /// Build an [`GitHubError::Http`] from raw response text; bodies that are
    /// not JSON are kept as a JSON string
    pub fn from_response(status: u16, text: &str) -> Self {
        let body =
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Self::from_body(status, body)
    }

    /// Raw response body, when GitHub sent one
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            GitHubError::Http { body, .. } => Some(body),
            GitHubError::DeleteFailed { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Structured error object returned to the tool caller
    pub fn to_value(&self) -> Value {
        match self {
            GitHubError::Http {
                status,
                message,
                documentation_url,
                ..
            } => json!({
                "error": format!("HTTP Error {}", status),
                "message": message,
                "documentation_url": documentation_url,
            }),
            GitHubError::DeleteFailed { details, .. } => json!({
                "error": self.to_string(),
                "details": details,
            }),
            GitHubError::MissingToken | GitHubError::InvalidUrl(_) => json!({
                "error": self.to_string(),
            }),
            GitHubError::Transport(_) | GitHubError::InvalidBody { .. } => json!({
                "error": "Unexpected error",
                "details": self.to_string(),
            }),
        }
    }
}
