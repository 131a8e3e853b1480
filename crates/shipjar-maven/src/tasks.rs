//! Build task graph shared by all publication strategies.
//!
//! Tasks are keyed by name. Registering a name that already exists returns
//! the existing task, so strategies may ask for the same sidecar any number
//! of times and still end up with one task per name.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use shipjar_util::errors::ShipjarError;

/// Task group of the engine's entry task.
pub const PUBLISHER_GROUP: &str = "publisher";

/// Artifact classifier attached to a sidecar archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classifier {
    Sources,
    Javadoc,
}

impl Classifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sources => "sources",
            Self::Javadoc => "javadoc",
        }
    }
}

/// What a task does when the host runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum TaskAction {
    /// Provided by the host; only referenced here.
    External,
    /// A zero-content archive.
    EmptyArchive,
    /// Archive the sources of a source set.
    PackSources { source_set: String },
    /// Archive the output directory of another task.
    Repackage { from: String },
    /// Aggregates its dependencies; does no work itself.
    Lifecycle,
}

/// A task node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSpec {
    pub name: String,
    pub action: TaskAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Classifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskSpec {
    pub fn new(name: impl Into<String>, action: TaskAction) -> Self {
        Self {
            name: name.into(),
            action,
            classifier: None,
            group: None,
            description: None,
        }
    }

    /// A reference to a task the host already defines.
    pub fn external(name: impl Into<String>) -> Self {
        Self::new(name, TaskAction::External)
    }

    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_external(&self) -> bool {
        self.action == TaskAction::External
    }
}

/// Handle to a task in a [`TaskGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRef(NodeIndex);

/// Edge label between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEdge {
    /// The source needs the target to have run first.
    DependsOn,
    /// The target runs after the source, whenever the source runs.
    FinalizedBy,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Tasks and their ordering constraints, backed by petgraph.
#[derive(Debug, Default)]
pub struct TaskGraph {
    graph: DiGraph<TaskSpec, TaskEdge>,
    index: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task, or return the existing one with the same name.
    ///
    /// An external reference registered earlier is replaced by a concrete
    /// definition; a concrete definition is never replaced.
    pub fn register(&mut self, spec: TaskSpec) -> TaskRef {
        if let Some(&idx) = self.index.get(&spec.name) {
            if self.graph[idx].is_external() && !spec.is_external() {
                tracing::debug!(task = %spec.name, "defining previously referenced task");
                self.graph[idx] = spec;
            } else {
                tracing::trace!(task = %spec.name, "task already registered");
            }
            return TaskRef(idx);
        }
        tracing::debug!(task = %spec.name, "registering task");
        let name = spec.name.clone();
        let idx = self.graph.add_node(spec);
        self.index.insert(name, idx);
        TaskRef(idx)
    }

    /// Reference a host-provided task by name.
    pub fn reference(&mut self, name: &str) -> TaskRef {
        self.register(TaskSpec::external(name))
    }

    /// `task` runs only after `dependency`.
    pub fn depends_on(&mut self, task: TaskRef, dependency: TaskRef) {
        self.add_edge(task, dependency, TaskEdge::DependsOn);
    }

    /// `finalizer` runs right after `task`.
    pub fn finalized_by(&mut self, task: TaskRef, finalizer: TaskRef) {
        self.add_edge(task, finalizer, TaskEdge::FinalizedBy);
    }

    fn add_edge(&mut self, from: TaskRef, to: TaskRef, edge: TaskEdge) {
        let exists = self
            .graph
            .edges(from.0)
            .any(|e| e.target() == to.0 && *e.weight() == edge);
        if !exists {
            self.graph.add_edge(from.0, to.0, edge);
        }
    }

    /// Look up a task by name.
    pub fn find(&self, name: &str) -> Option<TaskRef> {
        self.index.get(name).copied().map(TaskRef)
    }

    pub fn spec(&self, task: TaskRef) -> &TaskSpec {
        &self.graph[task.0]
    }

    pub fn get(&self, name: &str) -> Option<&TaskSpec> {
        self.find(name).map(|t| self.spec(t))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskSpec> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Tasks defined by the engine (not host references), in registration order.
    pub fn defined(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks().filter(|t| !t.is_external())
    }

    /// Names of the direct dependencies of `name`, in the order they were added.
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.find(name)
            .map(|t| {
                self.targets(t.0, TaskEdge::DependsOn)
                    .into_iter()
                    .map(|idx| self.graph[idx].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn targets(&self, idx: NodeIndex, kind: TaskEdge) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| *e.weight() == kind)
            .map(|e| e.target())
            .collect();
        // petgraph yields the most recent edge first
        targets.reverse();
        targets
    }

    /// Tasks to run, in order, when `entry` is requested.
    ///
    /// Dependencies come before their dependents; a finalizer comes right
    /// after the task it finalizes, preceded by any dependency of its own
    /// that has not run yet.
    pub fn execution_order(&self, entry: TaskRef) -> Result<Vec<&TaskSpec>, ShipjarError> {
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        self.visit(entry.0, &mut marks, &mut order)?;
        Ok(order.into_iter().map(|idx| &self.graph[idx]).collect())
    }

    fn visit(
        &self,
        idx: NodeIndex,
        marks: &mut HashMap<NodeIndex, Mark>,
        order: &mut Vec<NodeIndex>,
    ) -> Result<(), ShipjarError> {
        match marks.get(&idx) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                return Err(ShipjarError::Generic {
                    message: format!("task cycle detected at `{}`", self.graph[idx].name),
                })
            }
            None => {}
        }
        marks.insert(idx, Mark::Visiting);
        for dep in self.targets(idx, TaskEdge::DependsOn) {
            self.visit(dep, marks, order)?;
        }
        marks.insert(idx, Mark::Done);
        order.push(idx);
        for finalizer in self.targets(idx, TaskEdge::FinalizedBy) {
            self.visit(finalizer, marks, order)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(tasks: &[&'a TaskSpec]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn register_is_memoized_by_name() {
        let mut graph = TaskGraph::new();
        let a = graph.register(TaskSpec::new("emptyJavadocJarForCore", TaskAction::EmptyArchive));
        let b = graph.register(TaskSpec::new("emptyJavadocJarForCore", TaskAction::EmptyArchive));
        assert_eq!(a, b);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn definition_replaces_reference() {
        let mut graph = TaskGraph::new();
        let r = graph.reference("javaSourceJarForCore");
        let d = graph.register(TaskSpec::new(
            "javaSourceJarForCore",
            TaskAction::PackSources {
                source_set: "main".into(),
            },
        ));
        assert_eq!(r, d);
        assert!(!graph.spec(d).is_external());

        graph.reference("javaSourceJarForCore");
        assert!(!graph.spec(d).is_external());
    }

    #[test]
    fn dependencies_run_first_and_finalizers_after() {
        let mut graph = TaskGraph::new();
        let entry = graph.register(TaskSpec::new("publishComponent", TaskAction::Lifecycle));
        let assemble = graph.reference("assembleRelease");
        let upload = graph.reference("publishMavenPublicationToMavenRepository");
        let sources = graph.register(TaskSpec::new("emptySourceJarForCore", TaskAction::EmptyArchive));
        graph.depends_on(entry, assemble);
        graph.finalized_by(entry, upload);
        graph.depends_on(upload, sources);

        let order = graph.execution_order(entry).unwrap();
        assert_eq!(
            names(&order),
            vec![
                "assembleRelease",
                "publishComponent",
                "emptySourceJarForCore",
                "publishMavenPublicationToMavenRepository"
            ]
        );
    }

    #[test]
    fn shared_dependency_runs_once() {
        let mut graph = TaskGraph::new();
        let entry = graph.register(TaskSpec::new("entry", TaskAction::Lifecycle));
        let a = graph.reference("a");
        let b = graph.reference("b");
        let shared = graph.reference("shared");
        graph.depends_on(entry, a);
        graph.depends_on(entry, b);
        graph.depends_on(a, shared);
        graph.depends_on(b, shared);
        graph.depends_on(b, shared);

        let order = graph.execution_order(entry).unwrap();
        assert_eq!(names(&order), vec!["shared", "a", "b", "entry"]);
        assert_eq!(graph.dependencies_of("b"), vec!["shared"]);
    }

    #[test]
    fn cycle_is_an_error() {
        let mut graph = TaskGraph::new();
        let a = graph.reference("a");
        let b = graph.reference("b");
        graph.depends_on(a, b);
        graph.depends_on(b, a);
        assert!(graph.execution_order(a).is_err());
    }
}
