//! Migration of a project folder to a fresh scaffold
//!
//! The original folder is renamed to `old_<name>` and never modified
//! afterwards. A new folder takes its place with a clean manifest, the target
//! framework version, the user's files and the old dependencies re-resolved by
//! the package tools. Only the setup steps and the framework install abort
//! the run; copy and reinstall problems are reported and skipped.

use anyhow::{Context, Result, anyhow, bail};
use colored::*;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::manifest::{PackageManifest, ProjectMetadata};
use super::{MANIFEST_FILE, backup_path_for, resolve_path};
use crate::install::PackageInstaller;

/// Top-level entries that are never carried into the new folder
pub const IGNORED_ITEMS: &[&str] = &[
    "node_modules",
    "package.json",
    "package-lock.json",
    "android",
    "ios",
    "web",
];

pub fn is_ignored(name: &str) -> bool {
    IGNORED_ITEMS.contains(&name)
}

/// Outcome of a completed migration
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub old_folder_path: PathBuf,
    pub new_folder_path: PathBuf,
    pub ignored_items: &'static [&'static str],
    pub installed_version: String,
    /// Top-level entries copied into the new folder
    pub copied: Vec<String>,
    /// Entries that failed to copy, with the reason
    pub failed_copies: Vec<(String, String)>,
    /// Non-fatal problems, e.g. dependencies that failed to reinstall
    pub warnings: Vec<String>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failed_copies.is_empty() && self.warnings.is_empty()
    }
}

/// Recursively copies `src` to `dst`. Symlinks are recreated, not followed.
///
/// Only directories, regular files and symlinks are copied; pipes, sockets
/// and device files are refused without being opened.
pub fn copy_recursively(src: &Path, dst: &Path) -> Result<()> {
    let file_type = fs::symlink_metadata(src)
        .with_context(|| format!("Failed to read {}", src.display()))?
        .file_type();

    if file_type.is_symlink() {
        return copy_symlink(src, dst);
    }

    if file_type.is_dir() {
        fs::create_dir_all(dst).with_context(|| format!("Failed to create {}", dst.display()))?;
        let entries =
            fs::read_dir(src).with_context(|| format!("Failed to list {}", src.display()))?;
        for entry in entries {
            let entry = entry?;
            copy_recursively(&entry.path(), &dst.join(entry.file_name()))?;
        }
        return Ok(());
    }

    if !file_type.is_file() {
        bail!("Cannot copy {}: {}", src.display(), special_file_kind(&file_type));
    }

    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

#[cfg(unix)]
fn special_file_kind(file_type: &fs::FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_fifo() {
        "it is a FIFO pipe"
    } else if file_type.is_socket() {
        "it is a socket"
    } else if file_type.is_block_device() || file_type.is_char_device() {
        "it is a device file"
    } else {
        "it is not a regular file"
    }
}

#[cfg(not(unix))]
fn special_file_kind(_file_type: &fs::FileType) -> &'static str {
    "it is not a regular file"
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target =
        fs::read_link(src).with_context(|| format!("Failed to read link {}", src.display()))?;
    std::os::unix::fs::symlink(&target, dst)
        .with_context(|| format!("Failed to create link {}", dst.display()))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        bail!("Symlinked directories are not supported: {}", src.display());
    }
    fs::copy(src, dst).with_context(|| format!("Failed to copy {}", src.display()))?;
    Ok(())
}

pub struct ProjectMigrator {
    installer: PackageInstaller,
}

impl ProjectMigrator {
    pub fn new(installer: PackageInstaller) -> Self {
        Self { installer }
    }

    /// Rebuilds `folder` as a fresh project on `target_version`.
    pub async fn migrate(&self, folder: &Path, target_version: &str) -> Result<MigrationReport> {
        let new_folder = resolve_path(folder)
            .with_context(|| format!("Failed to resolve {}", folder.display()))?;
        let folder_name = new_folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Cannot migrate {}: no folder name", new_folder.display()))?;
        let old_folder = backup_path_for(&new_folder)
            .ok_or_else(|| anyhow!("Cannot migrate {}: no parent folder", new_folder.display()))?;

        info!(
            "Migrating {:?} to Expo {} (backup at {:?})",
            new_folder, target_version, old_folder
        );

        // Any entry under the backup name blocks the run, dangling links included
        if fs::symlink_metadata(&old_folder).is_ok() {
            bail!(
                "Old folder already exists: {}. Please remove it first.",
                old_folder.display()
            );
        }

        fs::rename(&new_folder, &old_folder).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                new_folder.display(),
                old_folder.display()
            )
        })?;
        println!("{} Renamed {} to old_{}", "✓".green(), folder_name, folder_name);

        println!("📁 Creating new project folder: {}", folder_name);
        fs::create_dir_all(&new_folder)
            .with_context(|| format!("Failed to create {}", new_folder.display()))?;
        println!("{} Created new folder: {}", "✓".green(), folder_name);

        let mut report = MigrationReport {
            old_folder_path: old_folder.clone(),
            new_folder_path: new_folder.clone(),
            ignored_items: IGNORED_ITEMS,
            installed_version: target_version.to_string(),
            copied: Vec::new(),
            failed_copies: Vec::new(),
            warnings: Vec::new(),
        };

        self.copy_project_files(&old_folder, &new_folder, &mut report);

        let old_manifest =
            self.write_manifest(&old_folder, &new_folder, &folder_name, &mut report)?;

        println!("🚀 Installing Expo version {}...", target_version);
        if !self.installer.install_framework(target_version, &new_folder).await {
            bail!(
                "Failed to install Expo {} in {}. The original project is kept at {}",
                target_version,
                new_folder.display(),
                old_folder.display()
            );
        }
        println!("{} Successfully installed Expo version {}", "✓".green(), target_version);

        match old_manifest {
            Some(manifest) => {
                self.reinstall_dependencies(&manifest, &new_folder, &mut report).await
            }
            None => println!(
                "{} No {} found in old project, skipping dependency installation",
                "⚠".yellow(),
                MANIFEST_FILE
            ),
        }

        info!(
            "Migration of {:?} finished: {} copied, {} copy failures, {} warnings",
            new_folder,
            report.copied.len(),
            report.failed_copies.len(),
            report.warnings.len()
        );
        Ok(report)
    }

    fn copy_project_files(
        &self,
        old_folder: &Path,
        new_folder: &Path,
        report: &mut MigrationReport,
    ) {
        println!("📥 Copying files from old project...");

        let entries = match fs::read_dir(old_folder) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list {:?}: {}", old_folder, e);
                println!("{} Failed to list old project: {}", "✗".red(), e);
                report.warnings.push(format!("Could not list old project files: {}", e));
                return;
            }
        };

        let mut names: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name())
            .collect();
        names.sort();

        for name in names {
            let display = name.to_string_lossy().into_owned();
            if is_ignored(&display) {
                debug!("Skipping ignored entry {}", display);
                println!("{} Skipping: {} (excluded folder/file)", "⏭".dimmed(), display);
                continue;
            }

            match copy_recursively(&old_folder.join(&name), &new_folder.join(&name)) {
                Ok(()) => {
                    println!("{} Copied from old project: {}", "✓".green(), display);
                    report.copied.push(display);
                }
                Err(e) => {
                    warn!("Failed to copy {}: {:#}", display, e);
                    println!("{} Failed to copy {}: {:#}", "✗".red(), display, e);
                    report.failed_copies.push((display, format!("{:#}", e)));
                }
            }
        }
    }

    /// Writes the new manifest and returns the old one, if there was one
    fn write_manifest(
        &self,
        old_folder: &Path,
        new_folder: &Path,
        folder_name: &str,
        report: &mut MigrationReport,
    ) -> Result<Option<PackageManifest>> {
        println!("📄 Creating new {}...", MANIFEST_FILE);

        let old_manifest_path = old_folder.join(MANIFEST_FILE);
        let old_manifest = if old_manifest_path.exists() {
            match PackageManifest::read(&old_manifest_path) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    warn!("Ignoring unreadable old manifest: {:#}", e);
                    println!("{} {:#}, using default metadata", "⚠".yellow(), e);
                    report
                        .warnings
                        .push(format!("Old {} could not be read: {:#}", MANIFEST_FILE, e));
                    None
                }
            }
        } else {
            None
        };

        let metadata =
            ProjectMetadata::from_manifest(&old_manifest.clone().unwrap_or_default(), folder_name);
        metadata.write(new_folder)?;
        println!("{} Created {} with old project metadata", "✓".green(), MANIFEST_FILE);

        Ok(old_manifest)
    }

    async fn reinstall_dependencies(
        &self,
        manifest: &PackageManifest,
        new_folder: &Path,
        report: &mut MigrationReport,
    ) {
        println!("📦 Installing dependencies from old project...");

        let dependencies = manifest.dependency_names();
        let dev_dependencies = manifest.dev_dependency_names();
        println!(
            "📋 Found {} dependencies and {} dev dependencies in old project",
            dependencies.len(),
            dev_dependencies.len()
        );

        if dependencies.is_empty() && dev_dependencies.is_empty() {
            println!("{} No dependencies found in old project to install", "ℹ".blue());
            return;
        }

        if !dependencies.is_empty() {
            println!("📦 Installing dependencies: {}", dependencies.join(", "));
            match self.installer.install_packages(&dependencies, new_folder).await {
                Ok(true) => {}
                Ok(false) => {
                    println!("{} Warning: Some dependencies failed to install", "⚠".yellow());
                    report.warnings.push("Some dependencies failed to install".to_string());
                }
                Err(e) => {
                    println!("{} Error during dependency installation: {:#}", "✗".red(), e);
                    report.warnings.push(format!("Dependency installation error: {:#}", e));
                }
            }
        }

        if !dev_dependencies.is_empty() {
            println!("🔧 Installing dev dependencies: {}", dev_dependencies.join(", "));
            match self.installer.install_dev_dependencies(&dev_dependencies, new_folder).await {
                Ok(true) => {}
                Ok(false) => {
                    println!("{} Warning: Some dev dependencies failed to install", "⚠".yellow());
                    report.warnings.push("Some dev dependencies failed to install".to_string());
                }
                Err(e) => {
                    println!("{} Error during dev dependency installation: {:#}", "✗".red(), e);
                    report.warnings.push(format!("Dev dependency installation error: {:#}", e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ignored_set() {
        for name in ["node_modules", "package.json", "package-lock.json", "android", "ios", "web"] {
            assert!(is_ignored(name));
        }
        assert!(!is_ignored("app.json"));
        assert!(!is_ignored("yarn.lock"));
        assert!(!is_ignored("Node_Modules"));
    }

    #[test]
    fn test_copy_recursively_copies_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("components/ui")).unwrap();
        fs::write(src.join("App.tsx"), "export default App;").unwrap();
        fs::write(src.join("components/ui/Button.tsx"), "button").unwrap();

        let dst = temp_dir.path().join("dst");
        copy_recursively(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("App.tsx")).unwrap(), "export default App;");
        assert_eq!(fs::read_to_string(dst.join("components/ui/Button.tsx")).unwrap(), "button");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recursively_keeps_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink("real.txt", src.join("link.txt")).unwrap();

        let dst = temp_dir.path().join("dst");
        copy_recursively(&src, &dst).unwrap();

        let link = dst.join("link.txt");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("real.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recursively_refuses_fifo() {
        let temp_dir = TempDir::new().unwrap();
        let fifo = temp_dir.path().join("pipe");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        // Opening the pipe would block forever with no writer
        let err = copy_recursively(&fifo, &temp_dir.path().join("copy")).unwrap_err();

        assert!(err.to_string().contains("FIFO"));
        assert!(fs::symlink_metadata(temp_dir.path().join("copy")).is_err());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(copy_recursively(&missing, &temp_dir.path().join("dst")).is_err());
    }
}
