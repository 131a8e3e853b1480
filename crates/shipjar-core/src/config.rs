//! Publish options and their resolution.
//!
//! Resolution is an explicit two-phase protocol: the user mutates a raw
//! [`PublishConfig`] (the `[publish]` table of `shipjar.toml`), then
//! [`PublishConfig::resolve`] fills every blank field from the project and
//! the [`FallbackSources`] and validates the result. The returned
//! [`ResolvedConfig`] is read-only.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use shipjar_util::errors::ShipjarError;
use shipjar_util::strings::{is_blank, or_if_blank};
use tracing::debug;

use crate::project::Project;
use crate::properties::{
    FallbackSources, OSSRH_PASSWORD_ENV, OSSRH_USERNAME_ENV, REPOSITORY_PASSWORD_KEY,
    REPOSITORY_RELEASE_URL_KEY, REPOSITORY_SNAPSHOT_URL_KEY, REPOSITORY_USERNAME_KEY,
};
use crate::version::VersionSuffix;

/// User-facing publish options. All strings default to empty.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishConfig {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub artifact_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub release_repo_url: String,
    #[serde(default)]
    pub snapshot_repo_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_pack_source_code")]
    pub pack_source_code: bool,
    #[serde(default)]
    pub transitive_dependency: bool,
    /// Android build variant to publish; chosen from the build types when unset.
    #[serde(default)]
    pub android_variant: Option<String>,
}

fn default_pack_source_code() -> bool {
    true
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            group: String::new(),
            artifact_id: String::new(),
            version: String::new(),
            user_name: String::new(),
            password: String::new(),
            release_repo_url: String::new(),
            snapshot_repo_url: String::new(),
            description: String::new(),
            pack_source_code: default_pack_source_code(),
            transitive_dependency: false,
            android_variant: None,
        }
    }
}

impl fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishConfig")
            .field("group", &self.group)
            .field("artifact_id", &self.artifact_id)
            .field("version", &self.version)
            .field("user_name", &self.user_name)
            .field("password", &mask(&self.password))
            .field("release_repo_url", &self.release_repo_url)
            .field("snapshot_repo_url", &self.snapshot_repo_url)
            .field("description", &self.description)
            .field("pack_source_code", &self.pack_source_code)
            .field("transitive_dependency", &self.transitive_dependency)
            .field("android_variant", &self.android_variant)
            .finish()
    }
}

/// `***` for a non-empty secret, empty otherwise.
pub fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

impl PublishConfig {
    /// Classify the current version string.
    pub fn suffix(&self) -> VersionSuffix {
        VersionSuffix::of(&self.version)
    }

    /// Fill blank options from `project` and `fallbacks`, then validate.
    ///
    /// Idempotent: resolving a resolved configuration again yields the same
    /// configuration, since every defaulting step only touches blank fields.
    pub fn resolve(
        &self,
        project: &Project,
        fallbacks: &FallbackSources,
    ) -> Result<ResolvedConfig, ShipjarError> {
        let mut cfg = self.clone();

        if is_blank(&cfg.group) {
            cfg.group = default_group(project)?;
            debug!(project = %project.name, group = %cfg.group, "defaulted group");
        }

        if is_blank(&cfg.artifact_id) {
            cfg.artifact_id = project.name.clone();
            debug!(project = %project.name, "defaulted artifactId to project name");
        }

        if is_blank(&cfg.version) {
            cfg.version = project
                .declared_version()
                .map(str::to_string)
                .ok_or_else(|| {
                    ShipjarError::config(format!(
                        "unspecified version: set `version` in [publish] or [project] of project `{}`",
                        project.name
                    ))
                })?;
            debug!(project = %project.name, version = %cfg.version, "defaulted version");
        }

        let suffix = cfg.suffix();
        if !suffix.requires_credentials() {
            debug!(project = %project.name, "local version, repository settings not required");
            return Ok(ResolvedConfig(cfg));
        }

        fill(&mut cfg.user_name, "userName", || {
            fallbacks
                .property(REPOSITORY_USERNAME_KEY)
                .or_else(|| fallbacks.env_var(OSSRH_USERNAME_ENV))
        });
        fill(&mut cfg.password, "password", || {
            fallbacks
                .property(REPOSITORY_PASSWORD_KEY)
                .or_else(|| fallbacks.env_var(OSSRH_PASSWORD_ENV))
        });
        fill(&mut cfg.release_repo_url, "releaseRepoUrl", || {
            fallbacks.property(REPOSITORY_RELEASE_URL_KEY)
        });
        fill(&mut cfg.snapshot_repo_url, "snapshotRepoUrl", || {
            fallbacks.property(REPOSITORY_SNAPSHOT_URL_KEY)
        });

        let mut missing = Vec::new();
        if is_blank(&cfg.user_name) {
            missing.push("userName");
        }
        if is_blank(&cfg.password) {
            missing.push("password");
        }
        if is_blank(&cfg.release_repo_url) && is_blank(&cfg.snapshot_repo_url) {
            missing.push("releaseRepoUrl or snapshotRepoUrl");
        }
        if !missing.is_empty() {
            return Err(ShipjarError::config(format!(
                "missing repository credentials/urls for {suffix} version `{}` of project `{}`: {}",
                cfg.version,
                project.name,
                missing.join(", ")
            )));
        }

        Ok(ResolvedConfig(cfg))
    }
}

fn fill(field: &mut String, name: &str, fallback: impl FnOnce() -> Option<String>) {
    if let Some(value) = or_if_blank(field, fallback) {
        if *field != value {
            debug!(field = name, "filled from fallback sources");
        }
        *field = value;
    }
}

/// Nearest usable group in the project's lineage.
///
/// A group equal to the root project's name, or starting with `<root>.`, is
/// the host's implicit default and does not count.
fn default_group(project: &Project) -> Result<String, ShipjarError> {
    let root_name = project.root().name;
    let implicit_prefix = format!("{root_name}.");
    project
        .lineage()
        .map(|p| p.group.trim().to_string())
        .find(|g| !g.is_empty() && *g != root_name && !g.starts_with(&implicit_prefix))
        .ok_or_else(|| {
            ShipjarError::config(format!(
                "unspecified group: set `group` in [publish] of project `{}` or in an enclosing project",
                project.name
            ))
        })
}

/// A fully resolved, validated publish configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig(PublishConfig);

impl ResolvedConfig {
    /// `group:artifactId:version`.
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.0.group, self.0.artifact_id, self.0.version)
    }

    /// Give back the underlying configuration, e.g. to resolve it again.
    pub fn into_inner(self) -> PublishConfig {
        self.0
    }
}

impl Deref for ResolvedConfig {
    type Target = PublishConfig;

    fn deref(&self) -> &PublishConfig {
        &self.0
    }
}
