//! Expo project on disk: validation, manifest handling, backup and migration

pub mod delete;
pub mod manifest;
pub mod migrate;
pub mod validate;

pub use delete::{delete_folder, safe_delete_folder};
pub use manifest::{PackageManifest, ProjectMetadata};
pub use migrate::{IGNORED_ITEMS, MigrationReport, ProjectMigrator};
pub use validate::{PathProblem, validate_project_path};

use std::io;
use std::path::{Component, Path, PathBuf};

/// Framework package name
pub const FRAMEWORK_PACKAGE: &str = "expo";
/// Companion CLI package that also marks a project as an Expo project
pub const FRAMEWORK_CLI_PACKAGE: &str = "@expo/cli";
pub const MANIFEST_FILE: &str = "package.json";
/// Prefix of the sibling folder that keeps the original project
pub const BACKUP_PREFIX: &str = "old_";

/// Target of a single migration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    /// Absolute path of the project folder
    pub project_path: PathBuf,
    pub target_version: String,
}

/// Makes `path` absolute against the current directory and folds `.` and `..`
/// lexically, without touching symlinks.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

/// `old_<name>` next to `project_path`
pub fn backup_path_for(project_path: &Path) -> Option<PathBuf> {
    let name = project_path.file_name()?;
    let parent = project_path.parent()?;
    Some(parent.join(format!("{}{}", BACKUP_PREFIX, name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_folds_dots() {
        let resolved = resolve_path(Path::new("/tmp/a/./b/../c")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/a/c"));
    }

    #[test]
    fn test_resolve_relative_is_absolute() {
        let resolved = resolve_path(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_backup_path_is_sibling() {
        let backup = backup_path_for(Path::new("/work/apps/my-app")).unwrap();
        assert_eq!(backup, PathBuf::from("/work/apps/old_my-app"));
        assert!(backup_path_for(Path::new("/")).is_none());
    }
}
