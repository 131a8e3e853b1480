//! Sidecar artifact tasks (sources and javadoc archives).
//!
//! Every task has a fixed name derived from the project (or variant) name, and
//! registration goes through [`TaskGraph::register`], so asking for the same
//! sidecar twice yields the same task.

use shipjar_core::project::Project;
use shipjar_util::strings::capitalize;

use crate::javadoc::{JavadocPolicy, JAVADOC_TASK};
use crate::tasks::{Classifier, TaskAction, TaskGraph, TaskRef, TaskSpec};

/// Host task producing the Kotlin sources archive.
pub const KOTLIN_SOURCES_JAR_TASK: &str = "kotlinSourcesJar";

/// Host task compiling the main source set.
pub const CLASSES_TASK: &str = "classes";

pub const MAIN_SOURCE_SET: &str = "main";

/// Registers sidecar archive tasks for one project.
pub struct SidecarFactory<'a> {
    suffix: String,
    tasks: &'a mut TaskGraph,
}

impl<'a> SidecarFactory<'a> {
    pub fn new(project: &Project, tasks: &'a mut TaskGraph) -> Self {
        Self {
            suffix: capitalize(&project.name),
            tasks,
        }
    }

    /// Javadoc archive per `policy`; `None` yields no task.
    pub fn javadoc_jar(&mut self, policy: &JavadocPolicy) -> Option<TaskRef> {
        match policy {
            JavadocPolicy::None => None,
            JavadocPolicy::Empty => Some(self.tasks.register(
                TaskSpec::new(
                    format!("emptyJavadocJarFor{}", self.suffix),
                    TaskAction::EmptyArchive,
                )
                .classifier(Classifier::Javadoc),
            )),
            JavadocPolicy::Standard => {
                Some(self.repackage(format!("simpleJavadocJarFor{}", self.suffix), JAVADOC_TASK))
            }
            JavadocPolicy::Generated(task) => {
                Some(self.repackage(format!("dokkaJavadocJarFor{}", self.suffix), task))
            }
        }
    }

    fn repackage(&mut self, name: String, from: &str) -> TaskRef {
        let source = self.tasks.reference(from);
        let jar = self.tasks.register(
            TaskSpec::new(
                name,
                TaskAction::Repackage {
                    from: from.to_string(),
                },
            )
            .classifier(Classifier::Javadoc),
        );
        self.tasks.depends_on(jar, source);
        jar
    }

    /// Sources of the main source set, built after `classes`.
    pub fn java_sources_jar(&mut self, pack: bool) -> TaskRef {
        if !pack {
            return self.empty_sources_jar();
        }
        let classes = self.tasks.reference(CLASSES_TASK);
        let jar = self.tasks.register(
            TaskSpec::new(
                format!("javaSourceJarFor{}", self.suffix),
                TaskAction::PackSources {
                    source_set: MAIN_SOURCE_SET.to_string(),
                },
            )
            .classifier(Classifier::Sources),
        );
        self.tasks.depends_on(jar, classes);
        jar
    }

    /// The host's own Kotlin sources archive.
    pub fn kotlin_sources_jar(&mut self, pack: bool) -> TaskRef {
        if !pack {
            return self.empty_sources_jar();
        }
        self.tasks.reference(KOTLIN_SOURCES_JAR_TASK)
    }

    /// Java sources of the Android main source set, named after `variant`.
    pub fn android_sources_jar(&mut self, pack: bool, variant: &str) -> TaskRef {
        if !pack {
            return self.empty_sources_jar();
        }
        self.tasks.register(
            TaskSpec::new(
                format!("androidSourceJarFor{variant}"),
                TaskAction::PackSources {
                    source_set: MAIN_SOURCE_SET.to_string(),
                },
            )
            .classifier(Classifier::Sources),
        )
    }

    fn empty_sources_jar(&mut self) -> TaskRef {
        self.tasks.register(
            TaskSpec::new(
                format!("emptySourceJarFor{}", self.suffix),
                TaskAction::EmptyArchive,
            )
            .classifier(Classifier::Sources),
        )
    }
}
