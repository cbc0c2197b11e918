//! Synchronization backend abstraction
//!
//! Provides a unified interface for synchronizing a single path across
//! different tools (git and rsync ship by default), plus the tool-keyed
//! lookup the traversal engine dispatches through.

mod git;
mod mirror;

pub use git::GitBackend;
pub use mirror::RsyncBackend;

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};

use psync_fs::SyncPath;

/// Result of one backend operation on one path.
///
/// Ordinary synchronization failures are values, never errors: an
/// unreachable path or an unspawnable tool folds into [`Outcome::Failed`]
/// exactly like a nonzero tool exit, so the run can carry on with the
/// remaining paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation completed
    Success,
    /// The tool exited nonzero, could not be started, or declined the path
    Failed,
    /// The backend does not implement this operation
    Unsupported,
}

impl Outcome {
    /// Whether this outcome counts toward the run's failure state.
    pub fn is_error(self) -> bool {
        !matches!(self, Outcome::Success)
    }
}

/// Integration style for `update` on backends that distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStyle {
    /// Replay local work on top of the fetched state
    #[default]
    Rebase,
    /// Merge the fetched state into local work
    Merge,
}

/// A pluggable synchronization strategy over a single path.
///
/// Implementations must be safe to call with paths that do not exist;
/// such calls report [`Outcome::Failed`] rather than panicking or
/// returning early errors.
pub trait SyncBackend: Send + Sync {
    /// Fetch remote changes into `path` and integrate them per `merge`.
    fn update(
        &self,
        path: &SyncPath,
        origin: Option<&str>,
        merge: MergeStyle,
        show_output: bool,
    ) -> Outcome;

    /// Collect local changes under `path` and transmit them to `dest`.
    fn push(&self, path: &SyncPath, dest: Option<&str>, show_output: bool) -> Outcome;

    /// Resolve synchronization conflicts under `path`.
    ///
    /// Backends may decline by returning [`Outcome::Unsupported`]; the
    /// engine counts that as a failure but reports it separately.
    fn resolve(&self, path: &SyncPath, show_output: bool) -> Outcome;
}

/// Tool-keyed backend lookup with a designated default entry.
pub struct BackendSet {
    backends: HashMap<String, Box<dyn SyncBackend>>,
    default_tool: String,
}

impl BackendSet {
    /// Create an empty set whose unlabeled paths dispatch to `default_tool`.
    pub fn new(default_tool: impl Into<String>) -> Self {
        Self {
            backends: HashMap::new(),
            default_tool: default_tool.into(),
        }
    }

    /// The standard set: `git` (also the default) and `rsync`.
    pub fn with_defaults() -> Self {
        let mut set = Self::new("git");
        set.register("git", Box::new(GitBackend::new()));
        set.register("rsync", Box::new(RsyncBackend::new()));
        set
    }

    /// Register (or replace) the backend for a tool key.
    pub fn register(&mut self, tool: impl Into<String>, backend: Box<dyn SyncBackend>) {
        self.backends.insert(tool.into(), backend);
    }

    /// Look up the backend for a tool key, falling back to the default
    /// entry when the path named no tool. Returns `None` for unknown keys.
    pub fn get(&self, tool: Option<&str>) -> Option<&dyn SyncBackend> {
        let key = tool.unwrap_or(&self.default_tool);
        self.backends.get(key).map(Box::as_ref)
    }

    /// The key unlabeled paths dispatch to.
    pub fn default_tool(&self) -> &str {
        &self.default_tool
    }
}

/// Run an external tool and map its exit status onto an [`Outcome`].
///
/// With `show_output` the child inherits stdout and stderr; otherwise both
/// are discarded. Spawn failures (missing binary, unreachable working
/// directory) map to `Failed` like any nonzero exit.
pub(crate) fn run_tool(
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
    show_output: bool,
) -> Outcome {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }
    if show_output {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }
    tracing::debug!(program, ?args, ?working_dir, "running sync tool");
    match command.status() {
        Ok(status) if status.success() => Outcome::Success,
        Ok(status) => {
            tracing::debug!(program, code = ?status.code(), "sync tool exited nonzero");
            Outcome::Failed
        }
        Err(error) => {
            tracing::debug!(program, %error, "could not start sync tool");
            Outcome::Failed
        }
    }
}

/// Run an external tool capturing its stdout. Returns `None` when the tool
/// exits nonzero or cannot be started; stderr follows `show_output`.
pub(crate) fn capture_tool(
    program: &str,
    args: &[&str],
    working_dir: &Path,
    show_output: bool,
) -> Option<String> {
    let mut command = Command::new(program);
    command.args(args).current_dir(working_dir);
    if show_output {
        command.stderr(Stdio::inherit());
    } else {
        command.stderr(Stdio::null());
    }
    tracing::debug!(program, ?args, ?working_dir, "running sync tool (captured)");
    match command.output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            tracing::debug!(program, code = ?output.status.code(), "sync tool exited nonzero");
            None
        }
        Err(error) => {
            tracing::debug!(program, %error, "could not start sync tool");
            None
        }
    }
}
