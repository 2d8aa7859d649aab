use anyhow::Result;
use clap::Parser;
use colored::*;
use log::{error, info, warn};

use expo_migrator::cli::summary::{print_migration_plan, print_migration_summary, remove_backup};
use expo_migrator::cli::ui::display_welcome_banner;
use expo_migrator::cli::{Cli, collect_user_input};
use expo_migrator::config::Config;
use expo_migrator::install::PackageInstaller;
use expo_migrator::project::ProjectMigrator;
use expo_migrator::ui::prompts::prompt_confirmation;

fn init_logging() {
    // Log to file (truncated on each run); stderr if the file can't be opened
    let log_file = Config::get_log_path().and_then(|path| {
        Ok(std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?)
    });

    let mut builder = env_logger::Builder::from_default_env();
    if let Ok(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

/// `Ok(())` covers both a finished and a cancelled migration
async fn run() -> Result<()> {
    let config = Config::load()?;

    display_welcome_banner();

    let Some(request) = collect_user_input(&config).await? else {
        info!("Migration cancelled by user");
        println!();
        println!("{}", "✋ Migration cancelled.".yellow());
        return Ok(());
    };

    print_migration_plan(&request);

    let migrator = ProjectMigrator::new(PackageInstaller::from_config(&config));
    let report = match migrator.migrate(&request.project_path, &request.target_version).await {
        Ok(report) => report,
        Err(e) => {
            println!();
            println!("{} Migration failed!", "❌".red());
            return Err(e);
        }
    };

    print_migration_summary(&report);

    // Only offer removal when nothing from the old project still needs it
    if report.is_clean() {
        let question = format!("Remove the backup at {}?", report.old_folder_path.display());
        match prompt_confirmation(&question, false) {
            Ok(true) => {
                remove_backup(&report.old_folder_path);
            }
            Ok(false) => info!("Backup kept at {:?}", report.old_folder_path),
            Err(e) => warn!("Backup prompt failed, keeping backup: {:#}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let _cli = Cli::parse();
    info!("Starting expo-migrator {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("{:#}", e);
        println!();
        println!("{} {:#}", "✗".red(), e);
        std::process::exit(1);
    }
}
