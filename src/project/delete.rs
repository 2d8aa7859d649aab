use anyhow::{Context, Result, bail};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::resolve_path;
use crate::ui::prompts::prompt_confirmation;

/// Paths shallower than this are refused by `safe_delete_folder`
const MIN_PATH_DEPTH: usize = 3;

/// Removes `path` and everything below it.
pub fn delete_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }

    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if !metadata.is_dir() {
        bail!("Path is not a directory: {}", path.display());
    }

    fs::remove_dir_all(path)
        .with_context(|| format!("Failed to delete folder: {}", path.display()))?;
    info!("Deleted folder {:?}", path);
    Ok(())
}

fn protected_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = ["/", "/Users", "/System", "/Applications"]
        .iter()
        .map(PathBuf::from)
        .collect();

    if let Some(home) = dirs::home_dir() {
        for sub in ["Desktop", "Documents", "Downloads"] {
            paths.push(home.join(sub));
        }
        paths.push(home);
    }
    paths
}

/// Like `delete_folder`, but refuses protected or top-level paths.
///
/// When `confirm` is set the user is asked first; `Ok(false)` means they
/// declined and nothing was removed.
pub fn safe_delete_folder(path: &Path, confirm: bool) -> Result<bool> {
    let absolute =
        resolve_path(path).with_context(|| format!("Failed to resolve {}", path.display()))?;

    if protected_paths().contains(&absolute) {
        warn!("Refused to delete protected directory {:?}", absolute);
        bail!("Refusing to delete protected directory: {}", absolute.display());
    }

    if absolute.components().count() < MIN_PATH_DEPTH {
        warn!("Refused to delete shallow path {:?}", absolute);
        bail!("Path appears too broad for safe deletion: {}", absolute.display());
    }

    if confirm && !prompt_confirmation(&format!("Delete {}?", absolute.display()), false)? {
        info!("Deletion of {:?} declined", absolute);
        return Ok(false);
    }

    delete_folder(&absolute)?;
    Ok(true)
}
