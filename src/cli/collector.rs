//! Interactive collection of the migration target
//!
//! Every prompt may be cancelled; cancellation surfaces as `Ok(None)` and the
//! caller decides what to do with it.

use anyhow::Result;
use colored::*;
use is_terminal::IsTerminal;
use log::{info, warn};
use std::io;

use super::ui::with_spinner;
use crate::config::Config;
use crate::project::MigrationRequest;
use crate::ui::prompts::{
    prompt_confirmation_opt, prompt_custom_version, prompt_project_path, prompt_version_selection,
};
use crate::versions::{VersionValue, list_candidate_versions};

/// Asks for target version, project path and confirmation.
///
/// Returns `Ok(None)` when the user backs out or the terminal isn't interactive.
pub async fn collect_user_input(config: &Config) -> Result<Option<MigrationRequest>> {
    if !io::stdin().is_terminal() {
        warn!("stdin is not a terminal, nothing to prompt");
        return Ok(None);
    }

    println!();

    let menu = with_spinner("Fetching Expo SDK versions...", list_candidate_versions(config)).await;
    if let Some(reason) = &menu.fallback_reason {
        println!(
            "{}",
            "⚠️  Warning: Could not fetch latest Expo versions from npm registry".yellow()
        );
        println!("{}", format!("   {}", reason).dimmed());
        println!("{}", "   Falling back to static version list...".dimmed());
        println!();
    }

    let Some(choice) = prompt_version_selection(&menu)? else {
        return Ok(None);
    };
    println!();

    let target_version = match choice {
        VersionValue::Version(version) => version,
        VersionValue::Custom => {
            let Some(version) = prompt_custom_version()? else {
                return Ok(None);
            };
            println!();
            version
        }
    };

    let Some(project_path) = prompt_project_path()? else {
        return Ok(None);
    };
    println!();

    match prompt_confirmation_opt(&format!("🚀 {}", "Start migration?".bold()), true)? {
        Some(true) => {}
        Some(false) | None => return Ok(None),
    }

    info!("Collected migration of {:?} to {}", project_path, target_version);
    Ok(Some(MigrationRequest {
        project_path,
        target_version,
    }))
}
