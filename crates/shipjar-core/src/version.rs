use std::fmt;

use serde::Serialize;

/// Marker suffix of a version that is only published to the local repository.
pub const LOCAL_SUFFIX: &str = "-LOCAL";

/// Marker suffix of a snapshot version.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Classification of a version string by its trailing token.
///
/// Derived on demand from the version, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSuffix {
    Local,
    Snapshot,
    Release,
}

impl VersionSuffix {
    /// Classify `version`. Matching is case-sensitive.
    pub fn of(version: &str) -> Self {
        if version.ends_with(LOCAL_SUFFIX) {
            Self::Local
        } else if version.ends_with(SNAPSHOT_SUFFIX) {
            Self::Snapshot
        } else {
            Self::Release
        }
    }

    /// Whether publishing this kind of version needs repository credentials.
    pub fn requires_credentials(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl fmt::Display for VersionSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Local => "local",
            Self::Snapshot => "snapshot",
            Self::Release => "release",
        };
        f.write_str(s)
    }
}
