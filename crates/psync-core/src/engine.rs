//! Traversal engine: applies one operation across the project graph
//!
//! The engine guarantees two things per run: every project is visited at
//! most once (memoized error state, so reference cycles terminate), and
//! every distinct canonical path is dispatched to its backend at most once
//! (projects sharing a path observe the same outcome).

use std::collections::{BTreeSet, HashSet};

use crate::backend::{BackendSet, MergeStyle, Outcome};
use crate::progress::Progress;
use crate::project::{ProjectItem, TrackedPath};
use crate::registry::Registry;
use crate::report::RunReport;

/// Operation dispatched to each path's backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch and integrate remote changes
    Update,
    /// Collect and transmit local changes
    Push,
    /// Resolve synchronization conflicts
    Resolve,
}

/// Per-run knobs forwarded to backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Integration style for update runs; other operations ignore it
    pub merge: MergeStyle,

    /// Stream tool output to the terminal instead of discarding it
    pub show_output: bool,
}

/// Visitation bookkeeping for a single run. Built fresh per call and
/// discarded with it, so repeated runs on one engine start clean.
struct RunState {
    visited_paths: HashSet<String>,
    error_paths: HashSet<String>,
    unsupported_paths: HashSet<String>,
    visited_projects: Vec<bool>,
    error_projects: Vec<bool>,
    unknown_projects: BTreeSet<String>,
}

impl RunState {
    fn new(project_count: usize) -> Self {
        Self {
            visited_paths: HashSet::new(),
            error_paths: HashSet::new(),
            unsupported_paths: HashSet::new(),
            visited_projects: vec![false; project_count],
            error_projects: vec![false; project_count],
            unknown_projects: BTreeSet::new(),
        }
    }
}

/// Walks the project graph and dispatches paths to backends.
pub struct SyncEngine {
    registry: Registry,
    backends: BackendSet,
}

impl SyncEngine {
    /// Create an engine over a registry and a set of backends.
    pub fn new(registry: Registry, backends: BackendSet) -> Self {
        Self { registry, backends }
    }

    /// The registry this engine traverses.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Update the selected projects. See [`SyncEngine::apply`].
    pub fn update(
        &self,
        selectors: Option<&[String]>,
        options: &ApplyOptions,
        progress: &mut dyn Progress,
    ) -> RunReport {
        self.apply(Operation::Update, selectors, options, progress)
    }

    /// Push the selected projects. See [`SyncEngine::apply`].
    pub fn push(
        &self,
        selectors: Option<&[String]>,
        options: &ApplyOptions,
        progress: &mut dyn Progress,
    ) -> RunReport {
        self.apply(Operation::Push, selectors, options, progress)
    }

    /// Resolve conflicts in the selected projects. See [`SyncEngine::apply`].
    pub fn resolve(
        &self,
        selectors: Option<&[String]>,
        options: &ApplyOptions,
        progress: &mut dyn Progress,
    ) -> RunReport {
        self.apply(Operation::Resolve, selectors, options, progress)
    }

    /// Apply `op` to the selected projects and aggregate the results.
    ///
    /// `selectors` of `None` selects every auto-include project in
    /// declaration order. Selectors that match nothing are recorded in the
    /// report and skipped; the run continues with the rest.
    pub fn apply(
        &self,
        op: Operation,
        selectors: Option<&[String]>,
        options: &ApplyOptions,
        progress: &mut dyn Progress,
    ) -> RunReport {
        let mut state = RunState::new(self.registry.len());

        let requested: Vec<usize> = match selectors {
            None => self.registry.auto_indices().to_vec(),
            Some(names) => {
                let mut requested = Vec::new();
                for selector in names {
                    match self.registry.resolve(selector) {
                        Some(index) => requested.push(index),
                        None => {
                            tracing::warn!(selector = selector.as_str(), "unknown project");
                            state.unknown_projects.insert(selector.clone());
                        }
                    }
                }
                requested
            }
        };

        for &index in &requested {
            self.visit_project(index, op, options, &mut state, progress);
        }

        // Two selectors can land on the same project; report it once.
        let mut reported = HashSet::new();
        let mut failed_projects = Vec::new();
        for index in requested {
            if state.error_projects[index] && reported.insert(index) {
                failed_projects.push(self.registry.projects()[index].display_name(index));
            }
        }

        let mut failed_paths: Vec<String> = state.error_paths.into_iter().collect();
        failed_paths.sort();
        let mut unsupported_paths: Vec<String> = state.unsupported_paths.into_iter().collect();
        unsupported_paths.sort();

        RunReport {
            unknown_projects: state.unknown_projects.into_iter().collect(),
            failed_projects,
            failed_paths,
            unsupported_paths,
        }
    }

    /// Visit one project and return its aggregate error flag.
    ///
    /// Revisits return the recorded flag without touching any backend. A
    /// back-reference inside a cycle reads the flag as recorded so far;
    /// the project's own traversal is still in flight at that point.
    fn visit_project(
        &self,
        index: usize,
        op: Operation,
        options: &ApplyOptions,
        state: &mut RunState,
        progress: &mut dyn Progress,
    ) -> bool {
        if state.visited_projects[index] {
            return state.error_projects[index];
        }
        state.visited_projects[index] = true;

        let project = &self.registry.projects()[index];
        progress.enter_project(&project.display_name(index));

        let mut any_error = false;
        for item in &project.items {
            let item_error = match item {
                ProjectItem::Path(tracked) => self.sync_path(tracked, op, options, state, progress),
                ProjectItem::Reference(target) => match self.registry.lookup(target) {
                    Some(target_index) => {
                        self.visit_project(target_index, op, options, state, progress)
                    }
                    None => {
                        tracing::warn!(target = target.as_str(), "reference to unknown project");
                        state.unknown_projects.insert(target.clone());
                        true
                    }
                },
            };
            any_error |= item_error;
        }

        state.error_projects[index] = any_error;
        any_error
    }

    /// Dispatch one path to its backend, deduplicating across projects.
    /// Returns whether the path counts as failed.
    fn sync_path(
        &self,
        tracked: &TrackedPath,
        op: Operation,
        options: &ApplyOptions,
        state: &mut RunState,
        progress: &mut dyn Progress,
    ) -> bool {
        let key = tracked.path.as_str();
        if state.visited_paths.contains(key) {
            return state.error_paths.contains(key);
        }
        state.visited_paths.insert(key.to_string());

        let Some(backend) = self.backends.get(tracked.tool.as_deref()) else {
            tracing::warn!(path = key, tool = ?tracked.tool, "no backend registered for tool");
            state.error_paths.insert(key.to_string());
            return true;
        };

        progress.path_started(key);
        let outcome = match op {
            Operation::Update => backend.update(
                &tracked.path,
                tracked.origin.as_deref(),
                options.merge,
                options.show_output,
            ),
            Operation::Push => {
                backend.push(&tracked.path, tracked.origin.as_deref(), options.show_output)
            }
            Operation::Resolve => backend.resolve(&tracked.path, options.show_output),
        };
        progress.path_finished(key, outcome);

        if outcome.is_error() {
            state.error_paths.insert(key.to_string());
            if outcome == Outcome::Unsupported {
                state.unsupported_paths.insert(key.to_string());
            }
            return true;
        }
        false
    }
}
