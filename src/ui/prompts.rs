use anyhow::Result;
use colored::*;
use dialoguer::{Input, Select};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::project::validate_project_path;
use crate::versions::{VersionMenu, VersionValue};

/// "51", "51.0", "51.0.0", "51.0.0-beta.1"
static VERSION_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?(\.\d+)?(-\w+(\.\d+)?)?$").unwrap());

pub fn is_valid_version_format(input: &str) -> bool {
    VERSION_FORMAT.is_match(input.trim())
}

/// Error message for a custom version entry, `None` when acceptable
pub fn check_custom_version(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return Some("Please enter a valid Expo SDK version".to_string());
    }
    if !is_valid_version_format(input) {
        return Some(
            "Please enter a valid version format (e.g., \"51\", \"51.0.0\", \"51.0.0-beta.1\")"
                .to_string(),
        );
    }
    None
}

/// Maps an interrupted or closed terminal to `None`
fn cancelled_on_interrupt<T>(
    result: std::result::Result<T, dialoguer::Error>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e))
            if matches!(
                e.kind(),
                ErrorKind::Interrupted | ErrorKind::UnexpectedEof | ErrorKind::NotConnected
            ) =>
        {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Returns
/// * `Ok(Some(true))` if user selects "Yes"
/// * `Ok(Some(false))` if user selects "No"
/// * `Ok(None)` if the prompt was cancelled
pub fn prompt_confirmation_opt(prompt: &str, default_yes: bool) -> Result<Option<bool>> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = cancelled_on_interrupt(
        Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(default_index)
            .interact_opt(),
    )?;

    Ok(selection.flatten().map(|index| index == 0))
}

/// Like `prompt_confirmation_opt`, a cancelled prompt counts as "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    Ok(prompt_confirmation_opt(prompt, default_yes)?.unwrap_or(false))
}

pub fn prompt_version_selection(menu: &VersionMenu) -> Result<Option<VersionValue>> {
    let selection = cancelled_on_interrupt(
        Select::new()
            .with_prompt(format!("🎯 {}", "Target Expo SDK version".bold()))
            .items(&menu.choices)
            .default(0)
            .interact_opt(),
    )?;

    Ok(selection
        .flatten()
        .and_then(|index| menu.choices.get(index))
        .map(|choice| choice.value.clone()))
}

pub fn prompt_custom_version() -> Result<Option<String>> {
    let version = cancelled_on_interrupt(
        Input::<String>::new()
            .with_prompt(format!("✏️  {}", "Enter custom Expo SDK version".bold()))
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                match check_custom_version(input) {
                    Some(message) => Err(message.red().to_string()),
                    None => Ok(()),
                }
            })
            .interact_text(),
    )?;

    Ok(version.map(|v| v.trim().to_string()))
}

/// Asks for the project folder until it names a valid Expo project.
///
/// Returns the resolved absolute path.
pub fn prompt_project_path() -> Result<Option<PathBuf>> {
    let input = cancelled_on_interrupt(
        Input::<String>::new()
            .with_prompt(format!("📁 {}", "Project path".bold()))
            .default(".".to_string())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                validate_project_path(input.trim())
                    .map(|_| ())
                    .map_err(|problem| problem.to_string().red().to_string())
            })
            .interact_text(),
    )?;

    match input {
        Some(path) => Ok(Some(validate_project_path(path.trim())?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_formats() {
        for ok in ["51", "51.0", "51.0.0", "51.0.0-beta", "51.0.0-beta.1", " 52.0.0 "] {
            assert!(is_valid_version_format(ok), "{} should be accepted", ok);
        }
        for bad in ["", "v51", "51.0.0.0", "latest", "51.x", "51.0.0-"] {
            assert!(!is_valid_version_format(bad), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_custom_version_messages() {
        assert_eq!(
            check_custom_version("   ").as_deref(),
            Some("Please enter a valid Expo SDK version")
        );
        assert!(check_custom_version("abc").unwrap().contains("valid version format"));
        assert!(check_custom_version("53.0.1").is_none());
    }
}
