//! Configuration loading for terminal-mcp
//!
//! Configuration is resolved in layers, later layers winning:
//! 1. Built-in defaults
//! 2. `.env` in the current directory (merged into the process environment)
//! 3. TOML file at `TERMINAL_MCP_CONFIG_PATH`, else `~/.binks/terminal.toml`
//! 4. Environment variables `GITHUB_TOKEN`, `GITHUB_API_URL`,
//!    `TERMINAL_WORKSPACE` and `TERMINAL_SHELL`
//!
//! The resulting [`Config`] is built once at startup and only read afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub github: GitHubConfig,
}

/// Local execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory shell commands run in. Its parent is the project root that
    /// push paths are resolved against.
    #[serde(default = "default_workspace_root")]
    pub root: PathBuf,
    /// Shell used to interpret commands
    #[serde(default = "default_shell")]
    pub shell: String,
}

/// GitHub REST settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST base URL, e.g. `https://ghe.example.com/api/v3` for Enterprise
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token; never written back out
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

fn default_workspace_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("mcp").join("workspace"))
        .unwrap_or_else(|| PathBuf::from("workspace"))
}

fn default_shell() -> String {
    if cfg!(windows) {
        "cmd".to_string()
    } else {
        "/bin/sh".to_string()
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
            shell: default_shell(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment,
    /// then create the workspace directory if it does not exist yet.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to read .env file: {}", e),
        }

        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.ensure_workspace()?;

        if config.github.token.is_none() {
            tracing::warn!("GITHUB_TOKEN is not set; GitHub tools will report an error");
        }

        Ok(config)
    }

    /// Parse a TOML document, filling gaps with defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides through `lookup`. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Some(url) = var("GITHUB_API_URL") {
            self.github.api_url = url;
        }
        if let Some(root) = var("TERMINAL_WORKSPACE") {
            self.workspace.root = PathBuf::from(root);
        }
        if let Some(shell) = var("TERMINAL_SHELL") {
            self.workspace.shell = shell;
        }
    }

    /// Create the workspace directory and pin it to an absolute path
    pub fn ensure_workspace(&mut self) -> Result<()> {
        let root = &self.workspace.root;
        std::fs::create_dir_all(root)
            .with_context(|| format!("creating workspace {}", root.display()))?;
        let resolved = root
            .canonicalize()
            .with_context(|| format!("resolving workspace {}", root.display()))?;
        self.workspace.root = resolved;
        tracing::info!("Workspace: {}", self.workspace.root.display());
        Ok(())
    }

    /// Parent of the workspace, or the workspace itself when it has none
    pub fn project_root(&self) -> &Path {
        let root = &self.workspace.root;
        root.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(root)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TERMINAL_MCP_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".binks").join("terminal.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_project_root_is_workspace_parent() {
        let config = Config {
            workspace: WorkspaceConfig {
                root: PathBuf::from("/home/dev/mcp/workspace"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.project_root(), Path::new("/home/dev/mcp"));
    }

    #[test]
    fn test_project_root_without_parent() {
        let config = Config {
            workspace: WorkspaceConfig {
                root: PathBuf::from("workspace"),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.project_root(), Path::new("workspace"));
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [github]
            api_url = "https://ghe.example.com/api/v3"
            "#,
        )
        .unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert!(config.github.token.is_none());
        assert_eq!(config.workspace.shell, default_shell());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::from_toml(
            r#"
            [workspace]
            root = "/srv/ws"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("GITHUB_TOKEN", "ghp_test"),
            ("TERMINAL_WORKSPACE", "/tmp/other"),
            ("GITHUB_API_URL", ""),
        ]
        .into_iter()
        .collect();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.workspace.root, PathBuf::from("/tmp/other"));
        assert_eq!(config.github.api_url, default_api_url());
    }

    #[test]
    fn test_debug_redacts_token() {
        let github = GitHubConfig {
            token: Some("ghp_secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", github);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_ensure_workspace_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            workspace: WorkspaceConfig {
                root: dir.path().join("mcp").join("workspace"),
                ..Default::default()
            },
            ..Default::default()
        };
        config.ensure_workspace().unwrap();
        assert!(config.workspace.root.is_dir());
        assert!(config.workspace.root.is_absolute());
    }
}
