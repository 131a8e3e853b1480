//! Fallback sources for publish options and `${env:VAR}` interpolation.
//!
//! `local.properties` in the root project directory holds repository
//! credentials and URLs under fixed keys. `.shipjar.env` next to a
//! `shipjar.toml` holds secrets referenced from the manifest as `${env:VAR}`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use shipjar_util::errors::ShipjarError;
use shipjar_util::strings::is_blank;

/// Property file consulted for repository settings, relative to the root project.
pub const PROPERTIES_FILE: &str = "local.properties";

/// Secrets file interpolated into `shipjar.toml`.
pub const ENV_FILE: &str = ".shipjar.env";

pub const REPOSITORY_USERNAME_KEY: &str = "REPO_USER";
pub const REPOSITORY_PASSWORD_KEY: &str = "REPO_PASSWORD";
pub const REPOSITORY_RELEASE_URL_KEY: &str = "REPO_RELEASE_URL";
pub const REPOSITORY_SNAPSHOT_URL_KEY: &str = "REPO_SNAPSHOT_URL";

pub const OSSRH_USERNAME_ENV: &str = "OSSRH_USERNAME";
pub const OSSRH_PASSWORD_ENV: &str = "OSSRH_PASSWORD";
pub const GPG_KEY_ID_ENV: &str = "GPG_KEY_ID";
pub const GPG_PASSWORD_ENV: &str = "GPG_PASSWORD";
pub const GPG_SECRET_KEY_RING_FILE_ENV: &str = "GPG_SECRET_KEY_RING_FILE";
pub const GRADLE_PUBLISH_KEY_ENV: &str = "GRADLE_PUBLISH_KEY";
pub const GRADLE_PUBLISH_SECRET_ENV: &str = "GRADLE_PUBLISH_SECRET";

/// Load a `KEY=value` file (`.properties` or shell-style `.env`).
///
/// Blank lines and lines starting with `#` or `!` are skipped. A missing file
/// yields an empty map.
pub fn load_properties_file(path: &Path) -> Result<BTreeMap<String, String>, ShipjarError> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(map)
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from the provided `env_overrides` map (populated
/// from `.shipjar.env`), then falls back to actual process environment variables.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${env:") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = env_overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_default();
        result.replace_range(start..=end, &value);
        from = start + value.len();
    }
    result
}

/// GPG signing settings taken from the environment.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SigningConfig {
    pub key_id: String,
    #[serde(skip)]
    pub password: String,
    pub secret_key_ring_file: Option<String>,
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("key_id", &self.key_id)
            .field("password", &"***")
            .field("secret_key_ring_file", &self.secret_key_ring_file)
            .finish()
    }
}

/// Plugin-portal API credentials taken from the environment.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PortalCredentials {
    pub key: String,
    #[serde(skip)]
    pub secret: String,
}

impl std::fmt::Debug for PortalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Read-only external sources consulted when a publish option is blank.
///
/// Loaded once per build and shared by every project in it.
#[derive(Debug, Clone, Default)]
pub struct FallbackSources {
    pub properties: BTreeMap<String, String>,
    pub env: BTreeMap<String, String>,
}

impl FallbackSources {
    /// Build from explicit maps (used by tests and embedders).
    pub fn new(properties: BTreeMap<String, String>, env: BTreeMap<String, String>) -> Self {
        Self { properties, env }
    }

    /// Load `local.properties` from `root_dir` and snapshot the process environment.
    pub fn load(root_dir: &Path) -> Result<Self, ShipjarError> {
        let properties = load_properties_file(&root_dir.join(PROPERTIES_FILE))?;
        tracing::debug!(
            path = %root_dir.join(PROPERTIES_FILE).display(),
            keys = properties.len(),
            "loaded fallback properties"
        );
        Ok(Self {
            properties,
            env: std::env::vars().collect(),
        })
    }

    /// A non-blank value from the property file.
    pub fn property(&self, key: &str) -> Option<String> {
        non_blank(self.properties.get(key))
    }

    /// A non-blank environment variable.
    pub fn env_var(&self, key: &str) -> Option<String> {
        non_blank(self.env.get(key))
    }

    /// Signing settings, present only when a key id and password are both set.
    pub fn signing(&self) -> Option<SigningConfig> {
        Some(SigningConfig {
            key_id: self.env_var(GPG_KEY_ID_ENV)?,
            password: self.env_var(GPG_PASSWORD_ENV)?,
            secret_key_ring_file: self.env_var(GPG_SECRET_KEY_RING_FILE_ENV),
        })
    }

    /// Plugin portal credentials, present only when key and secret are both set.
    pub fn plugin_portal(&self) -> Option<PortalCredentials> {
        Some(PortalCredentials {
            key: self.env_var(GRADLE_PUBLISH_KEY_ENV)?,
            secret: self.env_var(GRADLE_PUBLISH_SECRET_ENV)?,
        })
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !is_blank(v)).cloned()
}
