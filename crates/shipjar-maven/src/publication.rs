//! Maven publications and the per-project publishing container.

use serde::Serialize;

use crate::tasks::{Classifier, TaskGraph, TaskRef};

/// Name of the publication created for single-component platforms.
pub const DEFAULT_MAVEN_PUBLICATION_NAME: &str = "maven";

/// Root publication created by the Kotlin multiplatform plugin.
pub const MULTIPLATFORM_ROOT_PUBLICATION: &str = "kotlinMultiplatform";

/// Upload task for the single `maven` publication.
pub const PUBLISH_MAVEN_TASK: &str = "publishMavenPublicationToMavenRepository";

/// Upload task covering every publication of the project.
pub const PUBLISH_ALL_TASK: &str = "publishAllPublicationsToMavenRepository";

/// Maven coordinates of one publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Coordinates {
    pub group: String,
    pub artifact_id: String,
    pub version: String,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact_id, self.version)
    }
}

/// POM metadata. The XML itself is written by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PomSpec {
    pub name: String,
    pub description: String,
    /// Drop the `<dependencies>` block.
    pub strip_dependencies: bool,
}

/// A classified archive attached next to the main artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidecar {
    pub classifier: Classifier,
    pub task: String,
}

/// One Maven publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Publication {
    pub name: String,
    /// Binary component published from; `None` for host-created publications.
    pub component: Option<String>,
    /// Whether the host created this publication on its own.
    pub host_created: bool,
    pub coordinates: Coordinates,
    pub pom: PomSpec,
    pub artifacts: Vec<Sidecar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,
}

impl Publication {
    fn new(name: &str, component: Option<&str>, host_created: bool) -> Self {
        Self {
            name: name.to_string(),
            component: component.map(str::to_string),
            host_created,
            coordinates: Coordinates::default(),
            pom: PomSpec::default(),
            artifacts: Vec::new(),
            signing_key: None,
        }
    }

    /// Attach a sidecar, replacing any earlier one with the same classifier.
    pub fn attach(&mut self, classifier: Classifier, task: &str) {
        self.artifacts.retain(|a| a.classifier != classifier);
        self.artifacts.push(Sidecar {
            classifier,
            task: task.to_string(),
        });
    }

    pub fn artifact(&self, classifier: Classifier) -> Option<&Sidecar> {
        self.artifacts.iter().find(|a| a.classifier == classifier)
    }
}

/// Artifact id of a publication.
///
/// Multiplatform target publications are suffixed with their lowercased
/// name; the root and single-component publications use `artifact_id`.
pub fn artifact_id_for(publication: &str, artifact_id: &str, multiplatform: bool) -> String {
    if multiplatform && publication != MULTIPLATFORM_ROOT_PUBLICATION {
        format!("{artifact_id}-{}", publication.to_lowercase())
    } else {
        artifact_id.to_string()
    }
}

/// A project's publications together with the tasks that build them.
#[derive(Debug, Default)]
pub struct Publishing {
    publications: Vec<Publication>,
    pub tasks: TaskGraph,
}

impl Publishing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the publications the host already created.
    pub fn with_host_publications(names: &[String]) -> Self {
        Self {
            publications: names
                .iter()
                .map(|name| Publication::new(name, None, true))
                .collect(),
            tasks: TaskGraph::new(),
        }
    }

    /// Create the publication `name` from `component`, or return the existing one.
    pub fn create(&mut self, name: &str, component: &str) -> &mut Publication {
        let pos = match self.publications.iter().position(|p| p.name == name) {
            Some(pos) => {
                tracing::debug!(publication = name, "publication already exists");
                pos
            }
            None => {
                tracing::debug!(publication = name, component, "creating publication");
                self.publications
                    .push(Publication::new(name, Some(component), false));
                self.publications.len() - 1
            }
        };
        let publication = &mut self.publications[pos];
        publication.component = Some(component.to_string());
        publication
    }

    /// Attach the output of `task` to `publication` under `classifier`.
    pub fn attach(&mut self, publication: &str, classifier: Classifier, task: TaskRef) {
        let name = self.tasks.spec(task).name.clone();
        if let Some(p) = self.publications.iter_mut().find(|p| p.name == publication) {
            p.attach(classifier, &name);
        }
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn publications_mut(&mut self) -> &mut [Publication] {
        &mut self.publications
    }

    pub fn get(&self, name: &str) -> Option<&Publication> {
        self.publications.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}
