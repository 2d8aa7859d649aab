//! Candidate SDK versions for the migration target
//!
//! Queries the npm registry document for the framework package and turns it
//! into a small selection menu. Falls back to a static menu when the registry
//! can't be reached, so callers always get something to show.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::config::Config;

/// How many stable releases are kept after sorting
const TOP_STABLE_COUNT: usize = 5;

/// Markers of prerelease channels, besides a hyphenated suffix
const PRERELEASE_MARKERS: &[&str] = &["-", "alpha", "beta", "rc"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionValue {
    Version(String),
    /// Ask the user for a free-text version instead
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChoice {
    pub label: String,
    pub value: VersionValue,
}

impl VersionChoice {
    fn latest_stable(version: &str) -> Self {
        Self {
            label: format!("📱 SDK {} (Latest Stable)", version),
            value: VersionValue::Version(version.to_string()),
        }
    }

    fn custom() -> Self {
        Self {
            label: "🔧 Custom Version".to_string(),
            value: VersionValue::Custom,
        }
    }
}

impl fmt::Display for VersionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Menu handed to the version prompt
#[derive(Debug, Clone)]
pub struct VersionMenu {
    pub choices: Vec<VersionChoice>,
    /// Set when the static fallback was used, with the reason
    pub fallback_reason: Option<String>,
}

impl VersionMenu {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

#[derive(Debug, Default, Deserialize)]
struct DistTags {
    latest: Option<String>,
    canary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: DistTags,
    #[serde(default)]
    versions: HashMap<String, IgnoredAny>,
}

/// Version data extracted from the registry
#[derive(Debug, Clone)]
pub struct RegistryVersions {
    pub latest: Option<String>,
    pub canary: Option<String>,
    /// Newest stable releases, newest first
    pub stable: Vec<String>,
    pub all: Vec<String>,
}

impl RegistryVersions {
    fn from_document(document: RegistryDocument) -> Self {
        let all: Vec<String> = document.versions.into_keys().collect();

        let mut stable: Vec<String> = all.iter().filter(|v| is_stable(v)).cloned().collect();
        sort_descending(&mut stable);
        stable.truncate(TOP_STABLE_COUNT);

        Self {
            latest: document.dist_tags.latest,
            canary: document.dist_tags.canary,
            stable,
            all,
        }
    }
}

pub fn is_stable(version: &str) -> bool {
    !PRERELEASE_MARKERS.iter().any(|marker| version.contains(marker))
}

/// Compares dot-separated versions numerically, padding missing components with 0
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let (pa, pb) = (parse(a), parse(b));

    for i in 0..pa.len().max(pb.len()) {
        let na = pa.get(i).copied().unwrap_or(0);
        let nb = pb.get(i).copied().unwrap_or(0);
        match na.cmp(&nb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Sorts newest first
pub fn sort_descending(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_versions(b, a));
}

pub async fn fetch_registry_versions(registry_url: &str) -> Result<RegistryVersions> {
    debug!("Fetching registry document from {}", registry_url);

    let client = reqwest::Client::builder()
        .user_agent(concat!("expo-migrator/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let document: RegistryDocument = client
        .get(registry_url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", registry_url))?
        .error_for_status()
        .context("Registry returned an error status")?
        .json()
        .await
        .context("Failed to parse registry response")?;

    let versions = RegistryVersions::from_document(document);
    debug!(
        "Registry lists {} versions, latest={:?}, canary={:?}, top stable={:?}",
        versions.all.len(),
        versions.latest,
        versions.canary,
        versions.stable
    );
    Ok(versions)
}

pub fn fallback_menu(version: &str, reason: String) -> VersionMenu {
    VersionMenu {
        choices: vec![VersionChoice::latest_stable(version), VersionChoice::custom()],
        fallback_reason: Some(reason),
    }
}

/// Builds the version menu; never fails
pub async fn list_candidate_versions(config: &Config) -> VersionMenu {
    match fetch_registry_versions(&config.registry_url).await {
        Ok(RegistryVersions {
            latest: Some(latest),
            ..
        }) => VersionMenu {
            choices: vec![VersionChoice::latest_stable(&latest), VersionChoice::custom()],
            fallback_reason: None,
        },
        Ok(_) => {
            warn!("Registry document has no latest dist-tag, using fallback versions");
            fallback_menu(
                &config.fallback_version,
                "registry did not report a latest version".to_string(),
            )
        }
        Err(e) => {
            warn!("Could not fetch Expo versions: {:#}", e);
            fallback_menu(&config.fallback_version, format!("{:#}", e))
        }
    }
}
