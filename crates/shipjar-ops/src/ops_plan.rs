//! Operation: describe what publishing a project would do, without doing it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use shipjar_core::platform::PlatformKind;
use shipjar_core::properties::{PortalCredentials, SigningConfig};
use shipjar_maven::publication::Publication;
use shipjar_maven::repository::SelectedRepository;
use shipjar_maven::strategy::PublicationStrategy;
use shipjar_maven::tasks::TaskSpec;
use shipjar_util::errors::ShipjarError;

use crate::ops_publish::{prepare, PublishingSetup, SetupOutcome};

/// File name of the plan written under the build directory.
pub const PLAN_FILE: &str = "shipjar-plan.json";

/// Serializable view of a [`PublishingSetup`]. Secrets are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishPlan<'a> {
    pub project: &'a str,
    pub platform: PlatformKind,
    pub coordinate: String,
    pub strategy: &'a PublicationStrategy,
    pub repository: &'a SelectedRepository,
    pub publications: &'a [Publication],
    /// Tasks defined by the engine, in registration order.
    pub tasks: Vec<&'a TaskSpec>,
    /// Task names run by `publishComponent`, in order.
    pub execution: Vec<&'a str>,
    pub upload_task: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing: Option<&'a SigningConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_portal: Option<&'a PortalCredentials>,
}

impl<'a> PublishPlan<'a> {
    pub fn of(setup: &'a PublishingSetup) -> Result<Self, ShipjarError> {
        Ok(Self {
            project: &setup.project.name,
            platform: setup.platform,
            coordinate: setup.config.coordinate(),
            strategy: &setup.strategy,
            repository: &setup.repository,
            publications: setup.publishing.publications(),
            tasks: setup.publishing.tasks.defined().collect(),
            execution: setup
                .execution_order()?
                .into_iter()
                .map(|t| t.name.as_str())
                .collect(),
            upload_task: setup.upload_task(),
            signing: setup.signing.as_ref(),
            plugin_portal: setup.plugin_portal.as_ref(),
        })
    }

    pub fn to_json(&self) -> Result<String, ShipjarError> {
        serde_json::to_string_pretty(self).map_err(|e| ShipjarError::Generic {
            message: format!("Failed to serialize publication plan: {e}"),
        })
    }

    /// Human-readable summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("project:     {}\n", self.project));
        out.push_str(&format!("platform:    {}\n", self.platform));
        out.push_str(&format!("coordinate:  {}\n", self.coordinate));
        out.push_str(&format!(
            "repository:  {} ({})\n",
            self.repository.location(),
            self.repository.suffix
        ));
        if let Some(signing) = self.signing {
            out.push_str(&format!("signing key: {}\n", signing.key_id));
        }
        out.push_str("publications:\n");
        for p in self.publications {
            let component = p.component.as_deref().unwrap_or("(host)");
            out.push_str(&format!(
                "  {} <- {} as {}\n",
                p.name, component, p.coordinates
            ));
            let repo = &self.repository.repository;
            let c = &p.coordinates;
            out.push_str(&format!(
                "    artifact: {}\n",
                repo.jar_url(&c.group, &c.artifact_id, &c.version, None)
            ));
            for a in &p.artifacts {
                let classifier = a.classifier.as_str();
                out.push_str(&format!(
                    "    {classifier}: {} -> {}\n",
                    a.task,
                    repo.jar_url(&c.group, &c.artifact_id, &c.version, Some(classifier))
                ));
            }
        }
        out.push_str("tasks:\n");
        for name in &self.execution {
            out.push_str(&format!("  {name}\n"));
        }
        out
    }

    /// Write the JSON plan to `<build-dir>/shipjar-plan.json`.
    pub fn write(&self, build_dir: &Path) -> Result<PathBuf, ShipjarError> {
        shipjar_util::fs::ensure_dir(build_dir)?;
        let path = build_dir.join(PLAN_FILE);
        std::fs::write(&path, self.to_json()?)?;
        tracing::debug!(path = %path.display(), "wrote publication plan");
        Ok(path)
    }
}

/// Load the project in `dir` and set up its publications without running anything.
pub fn plan(dir: &Path) -> miette::Result<SetupOutcome> {
    Ok(prepare(dir)?.outcome)
}
