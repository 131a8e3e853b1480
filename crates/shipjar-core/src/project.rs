use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use shipjar_util::errors::ShipjarError;
use shipjar_util::fs::ancestors_with;

use crate::config::PublishConfig;
use crate::manifest::{HostConfig, ProjectManifest};
use crate::platform::{self, PlatformKind};
use crate::MANIFEST_FILE;

/// Version value the host reports when a project never declared one.
pub const UNSPECIFIED_VERSION: &str = "unspecified";

/// Name, group and location of a project in the ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
    pub group: String,
    pub dir: PathBuf,
}

/// A host project as seen by the publication engine.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub dir: PathBuf,
    pub group: String,
    pub version: String,
    pub build_dir: PathBuf,
    pub capabilities: BTreeSet<String>,
    pub build_types: Vec<String>,
    pub doc_tasks: Vec<String>,
    pub publications: Vec<String>,
    /// Enclosing projects, nearest first. Empty for a root project.
    pub ancestors: Vec<ProjectIdentity>,
}

/// A project together with the options and host settings from its manifest.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: Project,
    pub publish: PublishConfig,
    pub host: HostConfig,
}

impl Project {
    /// Build a project with no capabilities, rooted at `dir`.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            name: name.into(),
            build_dir: dir.join("build"),
            dir,
            group: String::new(),
            version: String::new(),
            capabilities: BTreeSet::new(),
            build_types: vec!["debug".to_string(), "release".to_string()],
            doc_tasks: Vec::new(),
            publications: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Build a project from its parsed manifest and its ancestor chain.
    pub fn from_manifest(dir: &Path, manifest: &ProjectManifest, ancestors: Vec<ProjectIdentity>) -> Self {
        let section = &manifest.project;
        let build_dir = match &section.build_dir {
            Some(rel) => dir.join(rel),
            None => dir.join("build"),
        };
        Self {
            name: section.name.clone(),
            dir: dir.to_path_buf(),
            group: section.group.clone(),
            version: section.version.clone(),
            build_dir,
            capabilities: section.plugins.iter().cloned().collect(),
            build_types: section.build_types.clone(),
            doc_tasks: section.doc_tasks.clone(),
            publications: section.publications.clone(),
            ancestors,
        }
    }

    /// Classify this project. Computed fresh on every call.
    pub fn platform(&self) -> PlatformKind {
        platform::classify(&self.capabilities)
    }

    /// The project's identity as an ancestor entry.
    pub fn identity(&self) -> ProjectIdentity {
        ProjectIdentity {
            name: self.name.clone(),
            group: self.group.clone(),
            dir: self.dir.clone(),
        }
    }

    /// The outermost project of the build (this project if it has no ancestors).
    pub fn root(&self) -> ProjectIdentity {
        self.ancestors
            .last()
            .cloned()
            .unwrap_or_else(|| self.identity())
    }

    /// This project followed by its ancestors, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = ProjectIdentity> + '_ {
        std::iter::once(self.identity()).chain(self.ancestors.iter().cloned())
    }

    /// The declared version, or `None` when blank or the host's unset sentinel.
    pub fn declared_version(&self) -> Option<&str> {
        let v = self.version.trim();
        if v.is_empty() || v == UNSPECIFIED_VERSION {
            None
        } else {
            Some(v)
        }
    }
}

/// Load the project in `dir` and every `shipjar.toml` above it.
/// Relative paths are resolved against the current directory first.
pub fn load_project(dir: &Path) -> miette::Result<LoadedProject> {
    let dir = std::path::absolute(dir).map_err(ShipjarError::Io)?;
    let dir = dir.as_path();
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ShipjarError::Manifest {
            message: format!("Could not find {MANIFEST_FILE} in {}", dir.display()),
        }
        .into());
    }
    let manifest = ProjectManifest::from_path(&manifest_path)?;

    let mut ancestors = Vec::new();
    for ancestor_dir in ancestors_with(dir, MANIFEST_FILE) {
        let parent = ProjectManifest::from_path(&ancestor_dir.join(MANIFEST_FILE))?;
        ancestors.push(ProjectIdentity {
            name: parent.project.name,
            group: parent.project.group,
            dir: ancestor_dir,
        });
    }
    tracing::debug!(
        project = %manifest.project.name,
        ancestors = ancestors.len(),
        "loaded project"
    );

    let project = Project::from_manifest(dir, &manifest, ancestors);
    Ok(LoadedProject {
        project,
        publish: manifest.publish,
        host: manifest.host,
    })
}
