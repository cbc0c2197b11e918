//! Live status reporting for traversal runs
//!
//! The engine performs no terminal output of its own; status events flow
//! through a [`Progress`] implementation supplied by the caller, keeping
//! presentation concerns (colors, verbosity) out of the core.

use crate::backend::Outcome;

/// Receiver for live traversal status events.
///
/// Deduplicated paths and memoized projects produce no events: each
/// project and each distinct path is announced at most once per run.
pub trait Progress {
    /// A project's items are about to be traversed.
    fn enter_project(&mut self, _name: &str) {}

    /// A path is about to be dispatched to its backend.
    fn path_started(&mut self, _path: &str) {}

    /// A path's backend invocation finished.
    fn path_finished(&mut self, _path: &str, _outcome: Outcome) {}
}

/// No-op sink for library callers and tests.
pub struct SilentProgress;

impl Progress for SilentProgress {}
