//! Maven repository abstraction: URL layout and destination selection.

use std::path::Path;

use serde::Serialize;
use shipjar_core::config::ResolvedConfig;
use shipjar_core::version::VersionSuffix;
use shipjar_util::errors::ShipjarError;
use shipjar_util::strings::is_blank;

/// Name of the repository every publication is uploaded to.
pub const DEFAULT_REPOSITORY_NAME: &str = "maven";

/// Directory under the build output that receives local publications.
pub const LOCAL_REPOSITORY_DIR: &str = "repository";

/// A configured Maven repository with optional credentials.
#[derive(Clone, Serialize)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
}

impl std::fmt::Debug for MavenRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MavenRepository")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl MavenRepository {
    /// Standard Maven layout path for a given coordinate.
    ///
    /// `com.example:core:1.0.0` becomes `com/example/core/1.0.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full URL to a specific file within the Maven repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// URL to a JAR for a given coordinate, optionally with a classifier.
    pub fn jar_url(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        classifier: Option<&str>,
    ) -> String {
        let filename = match classifier {
            Some(c) => format!("{artifact}-{version}-{c}.jar"),
            None => format!("{artifact}-{version}.jar"),
        };
        self.file_url(group, artifact, version, &filename)
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

/// Where a resolved version is published.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedRepository {
    pub suffix: VersionSuffix,
    pub credentials_required: bool,
    pub repository: MavenRepository,
}

impl SelectedRepository {
    /// URL (or `file://` location) shown to users.
    pub fn location(&self) -> &str {
        &self.repository.url
    }
}

/// Pick the destination for `config.version`.
///
/// Local versions go to `<build_dir>/repository` without credentials,
/// snapshots to the snapshot URL and releases to the release URL, both with
/// credentials. Must be called on the final, resolved configuration.
pub fn select_repository(
    config: &ResolvedConfig,
    build_dir: &Path,
) -> Result<SelectedRepository, ShipjarError> {
    let suffix = config.suffix();
    let (url, credentials_required) = match suffix {
        VersionSuffix::Local => {
            let path = build_dir.join(LOCAL_REPOSITORY_DIR);
            (format!("file://{}", path.display()), false)
        }
        VersionSuffix::Snapshot => (
            remote_url(&config.snapshot_repo_url, "snapshotRepoUrl", &config.version)?,
            true,
        ),
        VersionSuffix::Release => (
            remote_url(&config.release_repo_url, "releaseRepoUrl", &config.version)?,
            true,
        ),
    };
    tracing::debug!(%suffix, %url, credentials_required, "selected repository");

    let (username, password) = if credentials_required {
        (Some(config.user_name.clone()), Some(config.password.clone()))
    } else {
        (None, None)
    };
    Ok(SelectedRepository {
        suffix,
        credentials_required,
        repository: MavenRepository {
            name: DEFAULT_REPOSITORY_NAME.to_string(),
            url,
            username,
            password,
        },
    })
}

fn remote_url(url: &str, field: &str, version: &str) -> Result<String, ShipjarError> {
    if is_blank(url) {
        return Err(ShipjarError::config(format!(
            "`{field}` is required to publish version `{version}`"
        )));
    }
    Ok(url.trim().trim_end_matches('/').to_string())
}
