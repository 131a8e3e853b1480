//! Per-platform publication strategies.
//!
//! [`strategy_for`] maps every [`PlatformKind`] to a [`PublicationStrategy`]
//! with an exhaustive match; [`StrategyTable`] holds the result for each kind
//! and is the only owner of strategy values.

use std::collections::BTreeMap;

use serde::Serialize;
use shipjar_core::config::PublishConfig;
use shipjar_core::platform::PlatformKind;
use shipjar_core::project::Project;
use shipjar_util::errors::ShipjarError;
use shipjar_util::strings::capitalize;

use crate::artifacts::SidecarFactory;
use crate::javadoc::JavadocPolicy;
use crate::publication::{
    Publication, Publishing, DEFAULT_MAVEN_PUBLICATION_NAME, PUBLISH_ALL_TASK, PUBLISH_MAVEN_TASK,
};
use crate::tasks::{Classifier, TaskRef};

/// Compiled JVM component.
pub const JAVA_COMPONENT: &str = "java";

/// Kotlin/JS component.
pub const KOTLIN_COMPONENT: &str = "kotlin";

/// Build type published when none is requested.
pub const DEFAULT_ANDROID_VARIANT: &str = "release";

/// How publications are created for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "strategy")]
pub enum PublicationStrategy {
    /// Java, Kotlin/JVM and Gradle plugin projects: the `java` component plus
    /// main-source-set sources.
    JavaComponent {
        javadoc: JavadocPolicy,
        pack_sources: bool,
    },
    /// The `kotlin` component plus the host's Kotlin sources archive.
    KotlinJs {
        javadoc: JavadocPolicy,
        pack_sources: bool,
    },
    /// Javadoc attached to every host-created publication; sources are
    /// already present.
    KotlinMultiplatform { javadoc: JavadocPolicy },
    /// One Android build variant.
    AndroidVariant {
        variant: String,
        javadoc: JavadocPolicy,
        pack_sources: bool,
    },
    /// Applications are not published.
    SkipApplication,
    Unsupported { message: String },
}

/// The strategy `kind` uses for `project`, given the user's options.
pub fn strategy_for(kind: PlatformKind, project: &Project, config: &PublishConfig) -> PublicationStrategy {
    let javadoc = JavadocPolicy::default_for(kind, project);
    let pack_sources = config.pack_source_code;
    match kind {
        PlatformKind::JavaLibrary | PlatformKind::KotlinLibrary | PlatformKind::GradlePlugin => {
            PublicationStrategy::JavaComponent {
                javadoc,
                pack_sources,
            }
        }
        PlatformKind::KotlinJsLibrary => PublicationStrategy::KotlinJs {
            javadoc,
            pack_sources,
        },
        PlatformKind::KotlinMultiplatform => PublicationStrategy::KotlinMultiplatform { javadoc },
        PlatformKind::AndroidLibrary => PublicationStrategy::AndroidVariant {
            variant: config
                .android_variant
                .clone()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default_variant(&project.build_types)),
            javadoc,
            pack_sources,
        },
        PlatformKind::AndroidApplication => PublicationStrategy::SkipApplication,
        PlatformKind::Unsupported => PublicationStrategy::Unsupported {
            message: format!(
                "project `{}` applies none of the java, java-library, kotlin-jvm, kotlin-js, \
                 kotlin-multiplatform, java-gradle-plugin or android-library plugins",
                project.name
            ),
        },
    }
}

/// `release` when declared (or nothing is declared), else the first build type.
pub fn default_variant(build_types: &[String]) -> String {
    if build_types.is_empty() || build_types.iter().any(|b| b == DEFAULT_ANDROID_VARIANT) {
        DEFAULT_ANDROID_VARIANT.to_string()
    } else {
        build_types[0].clone()
    }
}

impl PublicationStrategy {
    pub fn javadoc_policy(&self) -> Option<&JavadocPolicy> {
        match self {
            Self::JavaComponent { javadoc, .. }
            | Self::KotlinJs { javadoc, .. }
            | Self::KotlinMultiplatform { javadoc }
            | Self::AndroidVariant { javadoc, .. } => Some(javadoc),
            Self::SkipApplication | Self::Unsupported { .. } => None,
        }
    }

    /// Binary component the publication is created from.
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::JavaComponent { .. } => Some(JAVA_COMPONENT),
            Self::KotlinJs { .. } => Some(KOTLIN_COMPONENT),
            Self::AndroidVariant { variant, .. } => Some(variant.as_str()),
            Self::KotlinMultiplatform { .. } | Self::SkipApplication | Self::Unsupported { .. } => {
                None
            }
        }
    }

    /// Host task uploading the publications this strategy produces.
    pub fn upload_task(&self) -> &'static str {
        match self {
            Self::KotlinMultiplatform { .. } => PUBLISH_ALL_TASK,
            _ => PUBLISH_MAVEN_TASK,
        }
    }

    /// Host task that must complete before publishing starts.
    pub fn assemble_task(&self) -> Option<String> {
        match self {
            Self::AndroidVariant { variant, .. } => Some(format!("assemble{}", capitalize(variant))),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkipApplication)
    }

    /// Register this strategy's publications and sidecar tasks on `publishing`.
    ///
    /// `configure` is applied to every publication created or adopted.
    /// Returns the names of those publications. Running it again on the same
    /// `publishing` leaves one publication and one task per name.
    pub fn setup(
        &self,
        project: &Project,
        publishing: &mut Publishing,
        configure: &dyn Fn(&mut Publication),
    ) -> Result<Vec<String>, ShipjarError> {
        match self {
            Self::JavaComponent {
                javadoc,
                pack_sources,
            } => {
                let mut factory = SidecarFactory::new(project, &mut publishing.tasks);
                let sources = factory.java_sources_jar(*pack_sources);
                let docs = factory.javadoc_jar(javadoc);
                Ok(vec![create_single(publishing, JAVA_COMPONENT, sources, docs, configure)])
            }
            Self::KotlinJs {
                javadoc,
                pack_sources,
            } => {
                let mut factory = SidecarFactory::new(project, &mut publishing.tasks);
                let sources = factory.kotlin_sources_jar(*pack_sources);
                let docs = factory.javadoc_jar(javadoc);
                Ok(vec![create_single(publishing, KOTLIN_COMPONENT, sources, docs, configure)])
            }
            Self::KotlinMultiplatform { javadoc } => {
                if publishing.is_empty() {
                    tracing::warn!(project = %project.name, "no multiplatform publications to configure");
                }
                let docs = SidecarFactory::new(project, &mut publishing.tasks).javadoc_jar(javadoc);
                let docs_name = docs.map(|t| publishing.tasks.spec(t).name.clone());
                let mut names = Vec::new();
                for publication in publishing.publications_mut() {
                    configure(publication);
                    if let Some(task) = &docs_name {
                        publication.attach(Classifier::Javadoc, task);
                    }
                    names.push(publication.name.clone());
                }
                Ok(names)
            }
            Self::AndroidVariant {
                variant,
                javadoc,
                pack_sources,
            } => {
                if !project.build_types.iter().any(|b| b == variant) {
                    return Err(ShipjarError::MissingVariant {
                        project: project.name.clone(),
                        variant: variant.clone(),
                        available: if project.build_types.is_empty() {
                            "none".to_string()
                        } else {
                            project.build_types.join(", ")
                        },
                    });
                }
                let mut factory = SidecarFactory::new(project, &mut publishing.tasks);
                let sources = factory.android_sources_jar(*pack_sources, &capitalize(variant));
                let docs = factory.javadoc_jar(javadoc);
                Ok(vec![create_single(publishing, variant, sources, docs, configure)])
            }
            Self::SkipApplication => {
                tracing::info!(project = %project.name, "application projects are not published");
                Ok(Vec::new())
            }
            Self::Unsupported { message } => Err(ShipjarError::UnsupportedPlatform {
                project: project.name.clone(),
                message: message.clone(),
            }),
        }
    }
}

fn create_single(
    publishing: &mut Publishing,
    component: &str,
    sources: TaskRef,
    docs: Option<TaskRef>,
    configure: &dyn Fn(&mut Publication),
) -> String {
    configure(publishing.create(DEFAULT_MAVEN_PUBLICATION_NAME, component));
    publishing.attach(DEFAULT_MAVEN_PUBLICATION_NAME, Classifier::Sources, sources);
    if let Some(docs) = docs {
        publishing.attach(DEFAULT_MAVEN_PUBLICATION_NAME, Classifier::Javadoc, docs);
    }
    DEFAULT_MAVEN_PUBLICATION_NAME.to_string()
}

/// One strategy per platform kind.
#[derive(Debug, Clone)]
pub struct StrategyTable {
    entries: BTreeMap<PlatformKind, PublicationStrategy>,
}

impl StrategyTable {
    /// Build the table for `project` and the user's options.
    pub fn build(project: &Project, config: &PublishConfig) -> Self {
        Self {
            entries: PlatformKind::ALL
                .iter()
                .map(|&kind| (kind, strategy_for(kind, project, config)))
                .collect(),
        }
    }

    pub fn get(&self, kind: PlatformKind) -> &PublicationStrategy {
        &self.entries[&kind]
    }
}
