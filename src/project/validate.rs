use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::manifest::PackageManifest;
use super::{FRAMEWORK_CLI_PACKAGE, FRAMEWORK_PACKAGE, MANIFEST_FILE, resolve_path};

/// Why a path can't be migrated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathProblem {
    Missing(PathBuf),
    NotADirectory(PathBuf),
    NoManifest(PathBuf),
    InvalidManifest(PathBuf),
    NotAnExpoProject(PathBuf),
    Inaccessible(String),
}

impl fmt::Display for PathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathProblem::Missing(path) => write!(
                f,
                "❌ Directory does not exist: {}\n   Please try again with a valid path.",
                path.display()
            ),
            PathProblem::NotADirectory(path) => write!(
                f,
                "❌ Path is not a directory: {}\n   Please try again with a valid directory path.",
                path.display()
            ),
            PathProblem::NoManifest(path) => write!(
                f,
                "❌ No {} found in: {}\n   \
                 Please try again with a valid Node.js project directory.",
                MANIFEST_FILE,
                path.display()
            ),
            PathProblem::InvalidManifest(path) => write!(
                f,
                "❌ Invalid {} file in: {}\n   Please try again with a valid project directory.",
                MANIFEST_FILE,
                path.display()
            ),
            PathProblem::NotAnExpoProject(path) => write!(
                f,
                "❌ This is not an Expo project: {}\n   No Expo dependencies found in {}.",
                path.display(),
                MANIFEST_FILE
            ),
            PathProblem::Inaccessible(message) => write!(
                f,
                "❌ Error accessing path: {}\n   Please try again with a valid path.",
                message
            ),
        }
    }
}

impl std::error::Error for PathProblem {}

/// Checks that `path` is an existing Expo project directory.
///
/// Returns the resolved absolute path on success.
pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf, PathProblem> {
    let absolute =
        resolve_path(path.as_ref()).map_err(|e| PathProblem::Inaccessible(e.to_string()))?;
    debug!("Validating project path {:?}", absolute);

    if !absolute.exists() {
        return Err(PathProblem::Missing(absolute));
    }

    let metadata = fs::metadata(&absolute).map_err(|e| PathProblem::Inaccessible(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(PathProblem::NotADirectory(absolute));
    }

    let manifest_path = absolute.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Err(PathProblem::NoManifest(absolute));
    }

    let manifest = match PackageManifest::read(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("Unreadable manifest at {:?}: {:#}", manifest_path, e);
            return Err(PathProblem::InvalidManifest(absolute));
        }
    };

    let is_expo = [FRAMEWORK_PACKAGE, FRAMEWORK_CLI_PACKAGE]
        .iter()
        .any(|name| manifest.declares(name));
    if !is_expo {
        return Err(PathProblem::NotAnExpoProject(absolute));
    }

    Ok(absolute)
}
