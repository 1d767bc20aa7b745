//! Path enumeration for pushes
//!
//! A [`PushPlan`] resolves a project path once and can then list its
//! [`PushTarget`]s any number of times without touching the network.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::types::PublishError;

/// One local file and the repository path it is published to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTarget {
    pub local: PathBuf,
    pub remote: String,
}

/// A validated project path, either a single file or a directory tree
#[derive(Debug, Clone)]
pub struct PushPlan {
    project_root: PathBuf,
    project_path: String,
    resolved: PathBuf,
    is_file: bool,
}

impl PushPlan {
    /// Resolve `project_path` against `project_root`. The path must exist.
    ///
    /// Blocks on filesystem access; async callers run it off the runtime.
    pub fn resolve(project_root: &Path, project_path: &str) -> Result<Self, PublishError> {
        let resolved = project_root.join(project_path);
        let metadata = match std::fs::metadata(&resolved) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PublishError::PathNotFound(resolved))
            }
            Err(source) => {
                return Err(PublishError::Io {
                    path: resolved,
                    source,
                })
            }
        };

        Ok(Self {
            project_root: project_root.to_path_buf(),
            project_path: project_path.to_string(),
            resolved,
            is_file: metadata.is_file(),
        })
    }

    /// Absolute local path being pushed
    pub fn local_path(&self) -> &Path {
        &self.resolved
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// Files to publish, in a stable order
    ///
    /// A single file maps to the project path as given. Files under a
    /// directory map to their path relative to the project root, so the
    /// remote layout mirrors the local one. Directory entries that cannot be
    /// read are logged and skipped.
    pub fn targets(&self) -> impl Iterator<Item = PushTarget> + '_ {
        let single = self.is_file.then(|| PushTarget {
            local: self.resolved.clone(),
            remote: normalize_remote(&self.project_path),
        });

        let tree = (!self.is_file).then(|| {
            WalkDir::new(&self.resolved)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable entry");
                        None
                    }
                })
                .filter(|entry| entry.path().is_file())
                .map(move |entry| {
                    let local = entry.into_path();
                    let remote = self.remote_path(&local);
                    PushTarget { local, remote }
                })
        });

        single.into_iter().chain(tree.into_iter().flatten())
    }

    fn remote_path(&self, local: &Path) -> String {
        let base = self.resolved.parent().unwrap_or(&self.resolved);
        let relative = local
            .strip_prefix(&self.project_root)
            .or_else(|_| local.strip_prefix(base))
            .unwrap_or(local);

        let joined = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        normalize_remote(&joined)
    }
}

/// Forward slashes only, without empty or `.` segments
pub fn normalize_remote(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app/sub/deeper")).unwrap();
        fs::write(dir.path().join("app/a.txt"), "a").unwrap();
        fs::write(dir.path().join("app/sub/b.txt"), "b").unwrap();
        fs::write(dir.path().join("app/sub/deeper/c.txt"), "c").unwrap();
        dir
    }

    #[test]
    fn test_missing_path() {
        let dir = project();
        let err = PushPlan::resolve(dir.path(), "nope").unwrap_err();
        assert!(matches!(err, PublishError::PathNotFound(p) if p.ends_with("nope")));
    }

    #[test]
    fn test_unreadable_path_is_not_reported_missing() {
        let dir = project();
        let err = PushPlan::resolve(dir.path(), "app/bad\0name").unwrap_err();
        match err {
            PublishError::Io { path, source } => {
                assert!(path.starts_with(dir.path()));
                assert_eq!(source.kind(), ErrorKind::InvalidInput);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_single_file_keeps_given_path() {
        let dir = project();
        let plan = PushPlan::resolve(dir.path(), "app/a.txt").unwrap();
        assert!(plan.is_file());

        let targets: Vec<_> = plan.targets().collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].remote, "app/a.txt");
        assert_eq!(targets[0].local, dir.path().join("app/a.txt"));
    }

    #[test]
    fn test_directory_mirrors_project_root() {
        let dir = project();
        let plan = PushPlan::resolve(dir.path(), "app").unwrap();

        let remotes: Vec<_> = plan.targets().map(|t| t.remote).collect();
        assert_eq!(
            remotes,
            vec!["app/a.txt", "app/sub/b.txt", "app/sub/deeper/c.txt"]
        );
    }

    #[test]
    fn test_targets_are_restartable() {
        let dir = project();
        let plan = PushPlan::resolve(dir.path(), "app").unwrap();
        let first: Vec<_> = plan.targets().collect();
        let second: Vec<_> = plan.targets().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_empty_directory_has_no_targets() {
        let dir = project();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let plan = PushPlan::resolve(dir.path(), "empty").unwrap();
        assert_eq!(plan.targets().count(), 0);
    }

    #[test]
    fn test_normalize_remote() {
        assert_eq!(normalize_remote("servers\\terminal\\main.py"), "servers/terminal/main.py");
        assert_eq!(normalize_remote("./docs//guide.md"), "docs/guide.md");
        assert_eq!(normalize_remote("/abs/file.txt"), "abs/file.txt");
    }
}
