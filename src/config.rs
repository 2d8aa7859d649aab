use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "expo-migrator";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Registry document for the framework package
    #[serde(default = "default_registry_url")]
    pub registry_url: String,
    /// Offered when the registry can't be reached
    #[serde(default = "default_fallback_version")]
    pub fallback_version: String,
    /// Generic package manager, used for `install` and `install -D`
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
    /// Package runner that hosts the framework's own `install` subcommand
    #[serde(default = "default_package_runner")]
    pub package_runner: String,
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org/expo".to_string()
}

fn default_fallback_version() -> String {
    "54".to_string()
}

fn default_package_manager() -> String {
    "npm".to_string()
}

fn default_package_runner() -> String {
    "npx".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            fallback_version: default_fallback_version(),
            package_manager: default_package_manager(),
            package_runner: default_package_runner(),
        }
    }
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn get_log_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("expo-migrator.log"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config: registry={}, manager={}, runner={}",
            config.registry_url, config.package_manager, config.package_runner
        );
        Ok(config)
    }
}
