//! Manifest (frontstage.toml) parsing
//!
//! The manifest is the configuration surface owned by the host packaging
//! setup. It lists one `[[project]]` entry per frontend unit. Parsing stops
//! at primitive values; validation into [`crate::core::spec::ProjectSpec`]
//! happens separately.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigurationError;

/// The main project manifest (frontstage.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Frontend project entries, in build order
    #[serde(default, rename = "project")]
    pub projects: Vec<RawProjectSpec>,
}

/// One raw, unvalidated project entry from the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawProjectSpec {
    /// Unique target name
    #[serde(default)]
    pub target: String,

    /// Path to the frontend project root, relative to the manifest
    #[serde(default)]
    pub source_dir: String,

    /// Build output directory relative to `source_dir`; unset triggers
    /// framework detection after the build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<String>,

    /// Staging destination relative to the project root; defaults to
    /// `frontend/<target>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Extra arguments passed to the install invocation
    #[serde(default)]
    pub args: Vec<String>,

    /// Suppress streaming of subprocess output
    #[serde(default)]
    pub quiet: bool,

    /// Failure of this project does not abort the overall run
    #[serde(default)]
    pub optional: bool,

    /// Directories excluded from staging, in addition to the dependency cache
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_dirs: Vec<String>,

    /// Environment variable overrides for install and build invocations
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::ManifestParse { source: e })
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            return Err(ConfigurationError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::ManifestRead {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        Self::from_toml(&content)
    }

    /// Serialize the manifest to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let content = r#"
            [[project]]
            target = "app"
            source_dir = "frontend"
        "#;

        let manifest = Manifest::from_toml(content).unwrap();
        assert_eq!(manifest.projects.len(), 1);
        let project = &manifest.projects[0];
        assert_eq!(project.target, "app");
        assert_eq!(project.source_dir, "frontend");
        assert!(project.artifacts_dir.is_none());
        assert!(project.output_dir.is_none());
        assert!(project.args.is_empty());
        assert!(!project.quiet);
        assert!(!project.optional);
    }

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"
            [[project]]
            target = "app"
            source_dir = "frontend"
            artifacts_dir = "dist"
            output_dir = "staged/app"
            args = ["--production"]
            quiet = true
            optional = true
            exclude_dirs = ["coverage"]

            [project.env]
            NODE_ENV = "production"

            [[project]]
            target = "admin"
            source_dir = "admin-ui"
        "#;

        let manifest = Manifest::from_toml(content).unwrap();
        assert_eq!(manifest.projects.len(), 2);

        let app = &manifest.projects[0];
        assert_eq!(app.artifacts_dir.as_deref(), Some("dist"));
        assert_eq!(app.output_dir.as_deref(), Some("staged/app"));
        assert_eq!(app.args, vec!["--production"]);
        assert!(app.quiet);
        assert!(app.optional);
        assert_eq!(app.exclude_dirs, vec!["coverage"]);
        assert_eq!(app.env.get("NODE_ENV").map(String::as_str), Some("production"));

        assert_eq!(manifest.projects[1].target, "admin");
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::from_toml("").unwrap();
        assert!(manifest.projects.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml_fails() {
        let result = Manifest::from_toml("[[project]\ntarget = ");
        assert!(matches!(
            result,
            Err(ConfigurationError::ManifestParse { .. })
        ));
    }

    #[test]
    fn test_load_missing_manifest_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Manifest::load(&dir.path().join("frontstage.toml"));
        assert!(matches!(
            result,
            Err(ConfigurationError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn test_roundtrip() {
        let content = r#"
            [[project]]
            target = "app"
            source_dir = "frontend"
            artifacts_dir = "dist"
        "#;
        let manifest = Manifest::from_toml(content).unwrap();
        let serialized = manifest.to_toml().unwrap();
        let reparsed = Manifest::from_toml(&serialized).unwrap();
        assert_eq!(manifest, reparsed);
    }
}
