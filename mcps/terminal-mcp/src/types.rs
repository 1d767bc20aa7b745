//! Type definitions for terminal MCP

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

// ============================================================================
// Push Types
// ============================================================================

/// Outcome of publishing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PushResult {
    Success {
        path: String,
        html_url: String,
    },
    Error {
        path: String,
        error: String,
        /// GitHub's response body, when the failure came from the API
        details: Option<Value>,
    },
}

impl PushResult {
    /// Remote path the result refers to
    pub fn path(&self) -> &str {
        match self {
            PushResult::Success { path, .. } | PushResult::Error { path, .. } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PushResult::Success { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Complete,
}

/// Aggregate of a push, in discovery order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushReport {
    pub status: ReportStatus,
    pub success_count: usize,
    pub error_count: usize,
    pub details: Vec<PushResult>,
}

impl PushReport {
    pub fn from_results(details: Vec<PushResult>) -> Self {
        let success_count = details.iter().filter(|r| r.is_success()).count();
        Self {
            status: ReportStatus::Complete,
            success_count,
            error_count: details.len() - success_count,
            details,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Failures that stop a push before any file is published
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PublishError {
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_result_wire_shape() {
        let ok = PushResult::Success {
            path: "src/main.rs".into(),
            html_url: "https://github.com/o/r/blob/main/src/main.rs".into(),
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["path"], "src/main.rs");

        let failed = PushResult::Error {
            path: "logo.png".into(),
            error: "stream did not contain valid UTF-8".into(),
            details: None,
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value["details"].is_null());
    }

    #[test]
    fn test_report_counts() {
        let report = PushReport::from_results(vec![
            PushResult::Success {
                path: "a.txt".into(),
                html_url: "u".into(),
            },
            PushResult::Error {
                path: "b.bin".into(),
                error: "e".into(),
                details: None,
            },
            PushResult::Success {
                path: "c.txt".into(),
                html_url: "u".into(),
            },
        ]);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.error_count, 1);
        assert_eq!(serde_json::to_value(&report).unwrap()["status"], "complete");
    }

    #[test]
    fn test_path_not_found_value() {
        let err = PublishError::PathNotFound(PathBuf::from("/home/dev/mcp/missing"));
        assert_eq!(
            err.to_value()["error"],
            "Path not found: /home/dev/mcp/missing"
        );
    }

    #[test]
    fn test_io_error_value() {
        let err = PublishError::Io {
            path: PathBuf::from("/home/dev/mcp/locked"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_value()["error"],
            "Cannot access /home/dev/mcp/locked: permission denied"
        );
    }
}
