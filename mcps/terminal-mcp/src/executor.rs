//! Shell command execution inside the workspace
//!
//! Commands run through the configured shell with the workspace root as the
//! working directory. There is no allow-list: the workspace is the only
//! boundary. Failures never propagate, they come back as the result text.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::config::WorkspaceConfig;

/// Run `command` and return stdout, falling back to stderr when stdout is
/// empty. Spawn and IO failures are returned as their description.
pub async fn run_command(workspace: &WorkspaceConfig, command: &str) -> String {
    info!(cwd = %workspace.root.display(), "running: {}", command);

    match execute(workspace, command).await {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "command failed to run");
            e.to_string()
        }
    }
}

async fn execute(workspace: &WorkspaceConfig, command: &str) -> std::io::Result<String> {
    let output = Command::new(&workspace.shell)
        .arg(shell_flag(&workspace.shell))
        .arg(command)
        .current_dir(&workspace.root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.stdout.is_empty() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }
    Ok(String::from_utf8_lossy(&output.stderr).into_owned())
}

/// `cmd` takes `/C`, POSIX shells and PowerShell take `-c`
fn shell_flag(shell: &str) -> &'static str {
    let is_cmd = Path::new(shell)
        .file_stem()
        .map(|stem| stem.eq_ignore_ascii_case("cmd"))
        .unwrap_or(false);

    if is_cmd {
        "/C"
    } else {
        "-c"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(root: &Path) -> WorkspaceConfig {
        WorkspaceConfig {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_shell_flag() {
        assert_eq!(shell_flag("/bin/sh"), "-c");
        assert_eq!(shell_flag("bash"), "-c");
        assert_eq!(shell_flag("cmd"), "/C");
        assert_eq!(shell_flag("C:\\Windows\\System32\\cmd.exe"), "/C");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echo_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command(&workspace(dir.path()), "echo hello").await;
        assert!(output.contains("hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command(&workspace(dir.path()), "echo oops 1>&2").await;
        assert_eq!(output.trim(), "oops");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let output = run_command(&workspace(dir.path()), "ls").await;
        assert!(output.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_silent_command_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_command(&workspace(dir.path()), "true").await;
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_missing_shell_is_reported_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig {
            root: dir.path().to_path_buf(),
            shell: "/definitely/not/a/shell".to_string(),
        };
        let output = run_command(&config, "echo hello").await;
        assert!(!output.is_empty());
        assert!(!output.contains("hello"));
    }
}
