use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::PublishConfig;

/// The parsed representation of a `shipjar.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub project: ProjectSection,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub host: HostConfig,
}

/// Host project identity and capabilities from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "build-dir")]
    pub build_dir: Option<String>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default = "default_build_types", rename = "build-types")]
    pub build_types: Vec<String>,
    #[serde(default, rename = "doc-tasks")]
    pub doc_tasks: Vec<String>,
    #[serde(default)]
    pub publications: Vec<String>,
}

fn default_build_types() -> Vec<String> {
    vec!["debug".to_string(), "release".to_string()]
}

/// How host tasks are executed, from `[host]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_host_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            command: default_host_command(),
            args: Vec::new(),
        }
    }
}

fn default_host_command() -> String {
    "./gradlew".to_string()
}

impl ProjectManifest {
    /// Load and parse a `shipjar.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.shipjar.env` (if present alongside `shipjar.toml`) and
    /// process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            shipjar_util::errors::ShipjarError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars = crate::properties::load_properties_file(&dir.join(crate::properties::ENV_FILE))
            .unwrap_or_default();
        let resolved = crate::properties::interpolate(&content, &env_vars);

        Self::parse_toml(&resolved)
    }

    /// Parse a `shipjar.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            shipjar_util::errors::ShipjarError::Manifest {
                message: format!("Failed to parse shipjar.toml: {e}"),
            }
            .into()
        })
    }
}
