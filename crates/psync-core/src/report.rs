//! Run summary produced by the traversal engine

use serde::{Deserialize, Serialize};

/// Aggregated result of one traversal run.
///
/// Path lists and unknown names are sorted lexicographically so output is
/// deterministic; failed projects keep the order they were requested in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Selectors and reference targets that matched no project
    pub unknown_projects: Vec<String>,

    /// Requested projects whose subtree hit at least one failure
    /// (display names, request order)
    pub failed_projects: Vec<String>,

    /// Every distinct path whose synchronization failed
    pub failed_paths: Vec<String>,

    /// Subset of `failed_paths` whose backend declined the operation
    pub unsupported_paths: Vec<String>,
}

impl RunReport {
    /// Whether the run finished with nothing to complain about.
    ///
    /// A failed path always surfaces through some requested project, so
    /// checking projects and unknown names covers the whole report.
    pub fn is_clean(&self) -> bool {
        self.failed_projects.is_empty() && self.unknown_projects.is_empty()
    }
}
