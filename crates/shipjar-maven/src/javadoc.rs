//! Javadoc artifact policies.

use std::fmt;

use serde::Serialize;
use shipjar_core::platform::{has_doc_generator, PlatformKind};
use shipjar_core::project::Project;

/// Host task producing standard javadoc output.
pub const JAVADOC_TASK: &str = "javadoc";

/// Doc tasks preferred when a project exposes several.
pub const PREFERRED_DOC_TASKS: [&str; 2] = ["dokkaHtml", "dokka"];

/// How the javadoc sidecar of a publication is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "task")]
pub enum JavadocPolicy {
    /// No javadoc artifact.
    None,
    /// A zero-content javadoc archive.
    Empty,
    /// Repackage the output of the host's `javadoc` task.
    Standard,
    /// Repackage the output of a documentation generator task.
    Generated(String),
}

impl JavadocPolicy {
    /// Policy used when the caller does not pick one.
    ///
    /// Android projects never ship javadoc. Any other project with a
    /// documentation generator uses it; without one, Java and Gradle plugin
    /// projects use their standard javadoc and Kotlin projects ship an empty
    /// archive.
    pub fn default_for(kind: PlatformKind, project: &Project) -> Self {
        if kind.is_android() || kind == PlatformKind::Unsupported {
            return Self::None;
        }
        if has_doc_generator(&project.capabilities) {
            return Self::Generated(find_doc_task(&project.doc_tasks).to_string());
        }
        match kind {
            PlatformKind::JavaLibrary | PlatformKind::GradlePlugin => Self::Standard,
            PlatformKind::KotlinLibrary
            | PlatformKind::KotlinJsLibrary
            | PlatformKind::KotlinMultiplatform => Self::Empty,
            PlatformKind::AndroidLibrary
            | PlatformKind::AndroidApplication
            | PlatformKind::Unsupported => Self::None,
        }
    }
}

impl fmt::Display for JavadocPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Empty => f.write_str("empty"),
            Self::Standard => f.write_str("standard"),
            Self::Generated(task) => write!(f, "generated ({task})"),
        }
    }
}

/// The documentation task to repackage.
///
/// A single declared doc task wins outright; among several, the preferred
/// names are tried in order; with nothing usable, `dokka` is assumed.
pub fn find_doc_task(doc_tasks: &[String]) -> &str {
    if let [only] = doc_tasks {
        return only;
    }
    PREFERRED_DOC_TASKS
        .iter()
        .find(|name| doc_tasks.iter().any(|t| t == *name))
        .copied()
        .unwrap_or(PREFERRED_DOC_TASKS[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_doc_task_wins() {
        assert_eq!(find_doc_task(&tasks(&["dokkaGfm"])), "dokkaGfm");
    }

    #[test]
    fn html_preferred_among_several() {
        assert_eq!(
            find_doc_task(&tasks(&["dokkaGfm", "dokka", "dokkaHtml"])),
            "dokkaHtml"
        );
        assert_eq!(find_doc_task(&tasks(&["dokkaGfm", "dokka"])), "dokka");
    }

    #[test]
    fn falls_back_to_dokka() {
        assert_eq!(find_doc_task(&[]), "dokka");
        assert_eq!(find_doc_task(&tasks(&["dokkaGfm", "dokkaJekyll"])), "dokka");
    }

    #[test]
    fn display() {
        assert_eq!(JavadocPolicy::Generated("dokkaHtml".into()).to_string(), "generated (dokkaHtml)");
        assert_eq!(JavadocPolicy::Empty.to_string(), "empty");
    }
}
