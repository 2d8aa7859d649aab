//! Package installation through the project's package-manager tools
//!
//! Every install runs as a child process in the project folder with the
//! terminal inherited, so the user watches the tool's own progress output.

use anyhow::{Result, bail};
use colored::*;
use log::{debug, error, info, warn};
use std::path::Path;
use tokio::process::Command;

use crate::config::Config;
use crate::project::FRAMEWORK_PACKAGE;

/// Runs `program args…` through the platform shell in `cwd`.
///
/// Resolves to `true` only when the process exits with status 0. Failing to
/// spawn at all (missing shell, bad `cwd`) is logged and reported as `false`.
pub async fn execute_command(program: &str, args: &[String], cwd: &Path) -> bool {
    debug!("Running {} {:?} in {:?}", program, args, cwd);

    let mut command = shell_command(program, args);
    command.current_dir(cwd);

    match command.status().await {
        Ok(status) if status.success() => true,
        Ok(status) => {
            warn!("{} exited with {}", program, status);
            false
        }
        Err(e) => {
            error!("Failed to run {}: {}", program, e);
            println!("{} {}", "Command execution error:".red(), e);
            false
        }
    }
}

#[cfg(unix)]
fn shell_command(program: &str, args: &[String]) -> Command {
    // Arguments go through "$@" so the shell never re-splits them
    let mut command = Command::new("sh");
    command.arg("-c").arg("\"$0\" \"$@\"").arg(program).args(args);
    command
}

#[cfg(windows)]
fn shell_command(program: &str, args: &[String]) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(program).args(args);
    command
}

fn check_names(names: &[String]) -> Result<()> {
    if let Some(bad) = names.iter().find(|name| name.trim().is_empty() || name.starts_with('-')) {
        bail!("Invalid package name: {:?}", bad);
    }
    Ok(())
}

/// Invokes the framework-aware and plain package-manager installs
#[derive(Debug, Clone)]
pub struct PackageInstaller {
    /// Hosts the framework's `install` subcommand, e.g. `npx`
    runner: String,
    /// Plain package manager, e.g. `npm`
    manager: String,
}

impl PackageInstaller {
    pub fn new(runner: impl Into<String>, manager: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
            manager: manager.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.package_runner.clone(), config.package_manager.clone())
    }

    /// Installs `expo@<version>` with the plain package manager
    pub async fn install_framework(&self, version: &str, cwd: &Path) -> bool {
        let args = vec!["install".to_string(), format!("{}@{}", FRAMEWORK_PACKAGE, version)];
        println!("{} {} {}", "Running:".dimmed(), self.manager, args.join(" "));
        println!();

        execute_command(&self.manager, &args, cwd).await
    }

    /// Installs `names` through `expo install`, which picks versions compatible
    /// with the installed SDK.
    pub async fn install_packages(&self, names: &[String], cwd: &Path) -> Result<bool> {
        if names.is_empty() {
            println!("{} No packages to install", "⚠".yellow());
            return Ok(true);
        }
        check_names(names)?;

        println!("{} Installing {} package(s)...", "📦".blue(), names.len());
        println!("{} {}", "Packages:".dimmed(), names.join(", "));
        println!();

        let mut args = vec![FRAMEWORK_PACKAGE.to_string(), "install".to_string()];
        args.extend(names.iter().cloned());
        Ok(self.run_reported(&self.runner, &args, cwd, "Packages").await)
    }

    pub async fn install_single_package(&self, name: &str, cwd: &Path) -> Result<bool> {
        self.install_packages(&[name.to_string()], cwd).await
    }

    /// Installs `names` as development dependencies with the plain package manager
    pub async fn install_dev_dependencies(&self, names: &[String], cwd: &Path) -> Result<bool> {
        if names.is_empty() {
            println!("{} No dev dependencies to install", "⚠".yellow());
            return Ok(true);
        }
        check_names(names)?;

        println!("{} Installing {} dev dependency(ies)...", "🔧".blue(), names.len());
        println!("{} {}", "Dev Dependencies:".dimmed(), names.join(", "));
        println!();

        let mut args = vec!["install".to_string(), "-D".to_string()];
        args.extend(names.iter().cloned());
        Ok(self.run_reported(&self.manager, &args, cwd, "Dev dependencies").await)
    }

    async fn run_reported(&self, program: &str, args: &[String], cwd: &Path, what: &str) -> bool {
        println!("{} {} {}", "Running:".dimmed(), program, args.join(" "));
        println!();

        let success = execute_command(program, args, cwd).await;
        println!();
        if success {
            info!("{} installed: {}", what, args.join(" "));
            println!("{} {} installed successfully", "✓".green(), what);
        } else {
            warn!("{} installation failed: {}", what, args.join(" "));
            println!("{} {} installation failed", "✗".red(), what);
        }
        success
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_list_spawns_nothing() {
        // A missing cwd would make any spawn fail
        let installer = PackageInstaller::new("false", "false");
        let cwd = Path::new("/definitely/not/here");

        assert!(installer.install_packages(&[], cwd).await.unwrap());
        assert!(installer.install_dev_dependencies(&[], cwd).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_name_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let installer = PackageInstaller::new("true", "true");

        assert!(
            installer
                .install_packages(&names(&["react", " "]), temp_dir.path())
                .await
                .is_err()
        );
        assert!(
            installer
                .install_dev_dependencies(&names(&["--save"]), temp_dir.path())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_exit_status_decides_result() {
        let temp_dir = TempDir::new().unwrap();

        let ok = PackageInstaller::new("true", "true");
        assert!(ok.install_packages(&names(&["react"]), temp_dir.path()).await.unwrap());
        assert!(ok.install_dev_dependencies(&names(&["jest"]), temp_dir.path()).await.unwrap());
        assert!(ok.install_framework("54.0.0", temp_dir.path()).await);

        let failing = PackageInstaller::new("false", "false");
        assert!(!failing.install_single_package("react", temp_dir.path()).await.unwrap());
        assert!(!failing.install_framework("54.0.0", temp_dir.path()).await);
    }

    #[tokio::test]
    async fn test_execute_command_runs_in_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let args = names(&["marker.txt"]);

        assert!(execute_command("touch", &args, temp_dir.path()).await);
        assert!(temp_dir.path().join("marker.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_command_is_false() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!execute_command("expo-migrator-no-such-tool", &[], temp_dir.path()).await);
    }

    #[tokio::test]
    async fn test_bad_cwd_is_false() {
        assert!(!execute_command("true", &[], Path::new("/definitely/not/here")).await);
    }
}
