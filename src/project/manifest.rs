//! `package.json` as read from the old project and as written to the new one

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use super::MANIFEST_FILE;

/// Old project's manifest. Only the fields carried forward are modelled.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<Value>,
    pub version: Option<Value>,
    pub description: Option<Value>,
    pub main: Option<Value>,
    pub scripts: Option<Value>,
    pub keywords: Option<Value>,
    pub author: Option<Value>,
    pub license: Option<Value>,
    pub repository: Option<Value>,
    pub bugs: Option<Value>,
    pub homepage: Option<Value>,
    pub engines: Option<Value>,
    pub browserslist: Option<Value>,
    pub dependencies: Option<Map<String, Value>>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<Map<String, Value>>,
}

impl PackageManifest {
    pub fn read(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Whether `package` is listed under dependencies or devDependencies
    pub fn declares(&self, package: &str) -> bool {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .any(|deps| deps.get(package).is_some_and(is_set))
    }

    /// Runtime dependency names; version specs are dropped on purpose
    pub fn dependency_names(&self) -> Vec<String> {
        names_of(&self.dependencies)
    }

    pub fn dev_dependency_names(&self) -> Vec<String> {
        names_of(&self.dev_dependencies)
    }
}

fn names_of(deps: &Option<Map<String, Value>>) -> Vec<String> {
    deps.as_ref()
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default()
}

/// Null, false, 0 and "" don't count as set
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn carried(value: &Option<Value>) -> Option<Value> {
    value.as_ref().filter(|v| is_set(v)).cloned()
}

fn carried_or(value: &Option<Value>, default: Value) -> Value {
    carried(value).unwrap_or(default)
}

/// New project's manifest: old metadata, empty dependency maps
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetadata {
    pub name: Value,
    pub version: Value,
    pub description: Value,
    pub main: Value,
    pub scripts: Value,
    pub keywords: Value,
    pub author: Value,
    pub license: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engines: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browserslist: Option<Value>,
    // Repopulated by the installer, never copied
    dependencies: Map<String, Value>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: Map<String, Value>,
}

impl ProjectMetadata {
    pub fn from_manifest(old: &PackageManifest, folder_name: &str) -> Self {
        Self {
            name: carried_or(&old.name, Value::from(folder_name)),
            version: carried_or(&old.version, Value::from("1.0.0")),
            description: carried_or(&old.description, Value::from("")),
            main: carried_or(&old.main, Value::from("index.js")),
            scripts: carried_or(&old.scripts, Value::Object(Map::new())),
            keywords: carried_or(&old.keywords, Value::Array(Vec::new())),
            author: carried_or(&old.author, Value::from("")),
            license: carried_or(&old.license, Value::from("MIT")),
            repository: carried(&old.repository),
            bugs: carried(&old.bugs),
            homepage: carried(&old.homepage),
            engines: carried(&old.engines),
            browserslist: carried(&old.browserslist),
            dependencies: Map::new(),
            dev_dependencies: Map::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize package.json")?;
        json.push('\n');
        Ok(json)
    }

    /// Writes `package.json` into `project_dir`
    pub fn write(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = project_dir.join(MANIFEST_FILE);
        fs::write(&path, self.to_json()?).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> PackageManifest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_metadata_carried_and_dependencies_reset() {
        let old = manifest(json!({
            "name": "my-app",
            "version": "2.3.4",
            "main": "expo-router/entry",
            "scripts": { "start": "expo start" },
            "license": "UNLICENSED",
            "homepage": "https://example.com",
            "private": true,
            "dependencies": { "expo": "~50.0.0", "react": "18.2.0" },
            "devDependencies": { "typescript": "^5.1.3" }
        }));

        let new = serde_json::to_value(ProjectMetadata::from_manifest(&old, "folder")).unwrap();

        assert_eq!(new["name"], "my-app");
        assert_eq!(new["version"], "2.3.4");
        assert_eq!(new["main"], "expo-router/entry");
        assert_eq!(new["scripts"], json!({ "start": "expo start" }));
        assert_eq!(new["license"], "UNLICENSED");
        assert_eq!(new["homepage"], "https://example.com");
        assert_eq!(new["dependencies"], json!({}));
        assert_eq!(new["devDependencies"], json!({}));
        assert!(new.get("private").is_none());
        assert!(new.get("repository").is_none());
    }

    #[test]
    fn test_defaults_for_empty_manifest() {
        let metadata = ProjectMetadata::from_manifest(&PackageManifest::default(), "folder");
        let new = serde_json::to_value(metadata).unwrap();

        assert_eq!(
            new,
            json!({
                "name": "folder",
                "version": "1.0.0",
                "description": "",
                "main": "index.js",
                "scripts": {},
                "keywords": [],
                "author": "",
                "license": "MIT",
                "dependencies": {},
                "devDependencies": {}
            })
        );
    }

    #[test]
    fn test_nested_key_order_is_preserved() {
        let old: PackageManifest = serde_json::from_str(
            r#"{
                "scripts": { "z": "last", "a": "first" },
                "engines": { "node": ">=18", "bun": "1" }
            }"#,
        )
        .unwrap();

        let json = ProjectMetadata::from_manifest(&old, "folder").to_json().unwrap();

        let (z, a) = (json.find(r#""z""#).unwrap(), json.find(r#""a""#).unwrap());
        assert!(z < a, "scripts reordered:\n{}", json);
        let (node, bun) = (json.find(r#""node""#).unwrap(), json.find(r#""bun""#).unwrap());
        assert!(node < bun, "engines reordered:\n{}", json);
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let old = manifest(json!({ "name": "", "license": "" }));
        let new = ProjectMetadata::from_manifest(&old, "folder");
        assert_eq!(new.name, "folder");
        assert_eq!(new.license, "MIT");
    }

    #[test]
    fn test_dependency_names_drop_versions() {
        let old = manifest(json!({
            "dependencies": { "expo": "~50.0.0", "react-native": "0.73.6" },
            "devDependencies": { "@babel/core": "^7.20.0" }
        }));
        assert_eq!(old.dependency_names(), vec!["expo", "react-native"]);
        assert_eq!(old.dev_dependency_names(), vec!["@babel/core"]);
        assert!(PackageManifest::default().dependency_names().is_empty());
    }

    #[test]
    fn test_declares_checks_both_maps() {
        let old = manifest(json!({
            "dependencies": { "react": "18.2.0", "left-pad": "" },
            "devDependencies": { "expo": "1.0.0" }
        }));
        assert!(old.declares("expo"));
        assert!(old.declares("react"));
        assert!(!old.declares("left-pad"));
        assert!(!old.declares("@expo/cli"));
    }
}
