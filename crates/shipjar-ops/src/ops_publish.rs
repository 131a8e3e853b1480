//! Operation: set up a project's publications and publish them.
//!
//! Setup is two-phase: the caller collects the raw [`PublishConfig`], then
//! [`setup_publishing`] resolves it, dispatches the platform strategy and
//! wires the task graph. [`publish_component`] runs the resulting tasks
//! through a [`BuildHost`] and reports where the component went.

use std::path::{Path, PathBuf};

use shipjar_core::config::{PublishConfig, ResolvedConfig};
use shipjar_core::manifest::HostConfig;
use shipjar_core::platform::PlatformKind;
use shipjar_core::project::{load_project, Project};
use shipjar_core::properties::{FallbackSources, PortalCredentials, SigningConfig};
use shipjar_maven::publication::{artifact_id_for, Coordinates, Publication, Publishing};
use shipjar_maven::repository::{select_repository, SelectedRepository};
use shipjar_maven::strategy::{PublicationStrategy, StrategyTable};
use shipjar_maven::tasks::{TaskAction, TaskRef, TaskSpec, PUBLISHER_GROUP};
use shipjar_util::errors::ShipjarError;
use shipjar_util::process::CommandBuilder;
use tracing::{debug, info};

use crate::ops_plan::PublishPlan;
use crate::ops_report::PublishReport;

/// Entry task of a publish run.
pub const PUBLISH_COMPONENT_TASK: &str = "publishComponent";

/// Environment variable pointing the host at the JSON publication plan.
pub const PLAN_ENV: &str = "SHIPJAR_PLAN";

/// Runs build tasks on behalf of the engine.
pub trait BuildHost {
    /// Run `tasks` in the given order inside `project_dir`.
    fn run_tasks(&mut self, project_dir: &Path, tasks: &[&TaskSpec]) -> Result<(), ShipjarError>;
}

/// Everything needed to publish one project.
#[derive(Debug)]
pub struct PublishingSetup {
    pub project: Project,
    pub platform: PlatformKind,
    pub strategy: PublicationStrategy,
    pub config: ResolvedConfig,
    pub publishing: Publishing,
    pub repository: SelectedRepository,
    pub signing: Option<SigningConfig>,
    pub plugin_portal: Option<PortalCredentials>,
    entry: TaskRef,
}

/// Result of [`setup_publishing`].
#[derive(Debug)]
pub enum SetupOutcome {
    Ready(Box<PublishingSetup>),
    /// The project is not published (Android applications).
    Skipped { project: String, platform: PlatformKind },
}

/// Classify `project`, resolve `user_config` and register its publications.
pub fn setup_publishing(
    project: &Project,
    user_config: &PublishConfig,
    fallbacks: &FallbackSources,
) -> Result<SetupOutcome, ShipjarError> {
    let platform = project.platform();
    debug!(project = %project.name, %platform, "classified project");

    let table = StrategyTable::build(project, user_config);
    let strategy = table.get(platform).clone();
    if strategy.is_skipped() {
        info!(project = %project.name, %platform, "skipping publication");
        return Ok(SetupOutcome::Skipped {
            project: project.name.clone(),
            platform,
        });
    }

    let config = user_config.resolve(project, fallbacks)?;
    let signing = if config.suffix().requires_credentials() {
        fallbacks.signing()
    } else {
        None
    };
    let plugin_portal = if platform == PlatformKind::GradlePlugin {
        fallbacks.plugin_portal()
    } else {
        None
    };

    let mut publishing = Publishing::with_host_publications(&project.publications);
    let entry = publishing.tasks.register(
        TaskSpec::new(PUBLISH_COMPONENT_TASK, TaskAction::Lifecycle)
            .group(PUBLISHER_GROUP)
            .description("Publishes the component to its Maven repository"),
    );
    let repository = select_repository(&config, &project.build_dir)?;

    let mut setup = PublishingSetup {
        project: project.clone(),
        platform,
        strategy,
        config,
        publishing,
        repository,
        signing,
        plugin_portal,
        entry,
    };
    setup.dispatch()?;
    Ok(SetupOutcome::Ready(Box::new(setup)))
}

impl PublishingSetup {
    /// Run the platform strategy and wire the publish tasks.
    ///
    /// Safe to call again: publications and tasks are looked up by name.
    pub fn dispatch(&mut self) -> Result<Vec<String>, ShipjarError> {
        let config = &self.config;
        let signing_key = self.signing.as_ref().map(|s| s.key_id.clone());
        let multiplatform = self.platform == PlatformKind::KotlinMultiplatform;
        let configure = |publication: &mut Publication| {
            let artifact_id = artifact_id_for(&publication.name, &config.artifact_id, multiplatform);
            publication.pom.name = artifact_id.clone();
            publication.pom.description = config.description.clone();
            publication.pom.strip_dependencies = !config.transitive_dependency;
            publication.coordinates = Coordinates {
                group: config.group.clone(),
                artifact_id,
                version: config.version.clone(),
            };
            publication.signing_key = signing_key.clone();
        };
        let names = self
            .strategy
            .setup(&self.project, &mut self.publishing, &configure)?;

        let tasks = &mut self.publishing.tasks;
        if let Some(assemble) = self.strategy.assemble_task() {
            let assemble = tasks.reference(&assemble);
            tasks.depends_on(self.entry, assemble);
        }
        let upload = tasks.reference(self.strategy.upload_task());
        let sidecars: Vec<String> = self
            .publishing
            .publications()
            .iter()
            .flat_map(|p| p.artifacts.iter().map(|a| a.task.clone()))
            .collect();
        let tasks = &mut self.publishing.tasks;
        for name in sidecars {
            if let Some(sidecar) = tasks.find(&name) {
                tasks.depends_on(upload, sidecar);
            }
        }
        tasks.finalized_by(self.entry, upload);
        debug!(
            project = %self.project.name,
            publications = ?names,
            tasks = tasks.len(),
            "publishing configured"
        );
        Ok(names)
    }

    /// Name of the host task uploading the publications.
    pub fn upload_task(&self) -> &'static str {
        self.strategy.upload_task()
    }

    /// Tasks run by `publishComponent`, in order.
    pub fn execution_order(&self) -> Result<Vec<&TaskSpec>, ShipjarError> {
        self.publishing.tasks.execution_order(self.entry)
    }
}

/// Run `publishComponent` for `setup` on `host` and report the result.
///
/// The report is produced only once the host has run every task, the upload
/// included.
pub fn publish_component(
    setup: &PublishingSetup,
    host: &mut dyn BuildHost,
) -> Result<PublishReport, ShipjarError> {
    let order = setup.execution_order()?;
    info!(
        project = %setup.project.name,
        coordinate = %setup.config.coordinate(),
        repository = %setup.repository.location(),
        "publishing component"
    );
    host.run_tasks(&setup.project.dir, &order)?;
    Ok(PublishReport::new(&setup.config, &setup.repository))
}

/// A loaded project with its publications set up.
#[derive(Debug)]
pub struct Prepared {
    pub host: HostConfig,
    pub outcome: SetupOutcome,
}

/// Load the project in `dir`, its ancestors and fallback sources, and set up
/// its publications.
pub fn prepare(dir: &Path) -> miette::Result<Prepared> {
    let loaded = load_project(dir)?;
    let root_dir = loaded.project.root().dir;
    let fallbacks = FallbackSources::load(&root_dir)?;
    let outcome = setup_publishing(&loaded.project, &loaded.publish, &fallbacks)?;
    Ok(Prepared {
        host: loaded.host,
        outcome,
    })
}

/// Options for [`publish`].
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// List the tasks instead of running them.
    pub dry_run: bool,
}

/// Result of [`publish`].
#[derive(Debug)]
pub enum PublishOutcome {
    Published(PublishReport),
    DryRun(Vec<String>),
    Skipped { project: String, platform: PlatformKind },
}

/// `publishComponent` for the project in `dir`, using the host command from
/// its `shipjar.toml`.
pub fn publish(dir: &Path, options: &PublishOptions) -> miette::Result<PublishOutcome> {
    let prepared = prepare(dir)?;
    let setup = match prepared.outcome {
        SetupOutcome::Ready(setup) => setup,
        SetupOutcome::Skipped { project, platform } => {
            return Ok(PublishOutcome::Skipped { project, platform })
        }
    };

    if options.dry_run {
        let order = setup
            .execution_order()?
            .into_iter()
            .map(|t| t.name.clone())
            .collect();
        return Ok(PublishOutcome::DryRun(order));
    }

    let plan_file = PublishPlan::of(&setup)?.write(&setup.project.build_dir)?;
    let mut host = CommandHost::for_project(&prepared.host, &setup.project).with_plan_file(plan_file);
    let report = publish_component(&setup, &mut host)?;
    Ok(PublishOutcome::Published(report))
}

/// Drives a Gradle-style command line (`./gradlew task1 task2 ...`).
#[derive(Debug, Clone)]
pub struct CommandHost {
    command: String,
    args: Vec<String>,
    plan_file: Option<PathBuf>,
}

impl CommandHost {
    pub fn new(host: &HostConfig) -> Self {
        Self {
            command: host.command.clone(),
            args: host.args.clone(),
            plan_file: None,
        }
    }

    /// Resolve a relative wrapper command (`./gradlew`) against the project
    /// and then its ancestors, taking the first directory that has it.
    pub fn for_project(host: &HostConfig, project: &Project) -> Self {
        let mut this = Self::new(host);
        let relative = Path::new(&host.command);
        if relative.is_relative() && relative.components().count() > 1 {
            if let Some(found) = project
                .lineage()
                .map(|p| p.dir.join(relative))
                .find(|candidate| candidate.is_file())
            {
                this.command = found.display().to_string();
            }
        }
        this
    }

    /// Export the plan file location to the host process.
    pub fn with_plan_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.plan_file = Some(path.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl BuildHost for CommandHost {
    fn run_tasks(&mut self, project_dir: &Path, tasks: &[&TaskSpec]) -> Result<(), ShipjarError> {
        let names: Vec<&str> = tasks
            .iter()
            .filter(|t| t.action != TaskAction::Lifecycle)
            .map(|t| t.name.as_str())
            .collect();
        let mut cmd = CommandBuilder::new(&self.command)
            .args(self.args.iter().cloned())
            .args(names.iter().copied())
            .cwd(project_dir);
        if let Some(plan) = &self.plan_file {
            cmd = cmd.env(PLAN_ENV, plan.display().to_string());
        }
        debug!(command = %cmd.display(), "running host tasks");
        let output = cmd.exec_checked(names.last().copied().unwrap_or(self.command.as_str()))?;
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "shipjar::host", "{line}");
        }
        Ok(())
    }
}
