use colored::*;
use log::warn;
use std::path::Path;

use crate::project::{MigrationReport, MigrationRequest, safe_delete_folder};

pub fn print_migration_plan(request: &MigrationRequest) {
    println!();
    println!("{} Migration configuration ready", "✓".green());
    println!("{} {}", "Version:".dimmed(), request.target_version);
    println!("{} {}", "Project:".dimmed(), request.project_path.display());
    println!();
    println!("{}", "🚀 Starting migration...".blue());
}

pub fn print_migration_summary(report: &MigrationReport) {
    println!();
    println!("{} Migration completed successfully!", "🎉".green());
    println!("{} {}", "Old project:".dimmed(), report.old_folder_path.display());
    println!("{} {}", "New project:".dimmed(), report.new_folder_path.display());
    println!();

    println!("{} Summary:", "📋".blue());
    println!(
        "{} Created new Expo project with version {}",
        "•".dimmed(),
        report.installed_version
    );
    println!(
        "{} Copied {} item(s) from the old project, skipped {}",
        "•".dimmed(),
        report.copied.len(),
        report.ignored_items.join(", ")
    );
    println!("{} Installed dependencies with compatible versions", "•".dimmed());
    println!("{} Your old project is safely backed up", "•".dimmed());

    if !report.is_clean() {
        println!();
        println!("{} Some steps need attention:", "⚠".yellow());
        for (name, reason) in &report.failed_copies {
            println!("{} Not copied: {} ({})", "•".dimmed(), name, reason);
        }
        for warning in &report.warnings {
            println!("{} {}", "•".dimmed(), warning);
        }
    }

    println!();
    println!("{} Next steps:", "💡".yellow());
    println!("{} Review the migrated code for any breaking changes", "•".dimmed());
    println!("{} Test your app thoroughly", "•".dimmed());
    println!("{} Update any deprecated APIs if needed", "•".dimmed());
    println!();
}

/// Deletes the backup folder left by a migration.
///
/// The migration has already succeeded at this point, so a refused or failed
/// deletion is only reported; `false` means the backup is still there.
pub fn remove_backup(path: &Path) -> bool {
    match safe_delete_folder(path, false) {
        Ok(removed) => {
            if removed {
                println!("{} Removed {}", "✓".green(), path.display());
            }
            removed
        }
        Err(e) => {
            warn!("Backup {:?} was not removed: {:#}", path, e);
            println!("{} Backup not removed: {:#}", "⚠".yellow(), e);
            println!("{} You can delete {} manually", "•".dimmed(), path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_remove_backup_deletes_folder() {
        let temp_dir = TempDir::new().unwrap();
        let backup = temp_dir.path().join("old_my-app");
        fs::create_dir_all(backup.join("app")).unwrap();
        fs::write(backup.join("app/index.tsx"), "export {}").unwrap();

        assert!(remove_backup(&backup));
        assert!(!backup.exists());
    }

    #[test]
    fn test_refused_backup_removal_is_not_an_error() {
        // Too shallow for the delete guard; must come back as a plain `false`
        assert!(!remove_backup(Path::new("/old_my-app")));
    }

    #[test]
    fn test_missing_backup_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!remove_backup(&temp_dir.path().join("old_gone")));
    }
}
