//! Rsync-backed directory mirroring

use psync_fs::SyncPath;

use super::{run_tool, MergeStyle, Outcome, SyncBackend};

/// Mirrors plain directory trees with `rsync` in archive-update mode,
/// deleting destination entries that vanished from the source.
///
/// `update` copies origin into the path; `push` reverses the direction.
/// There is no merge machinery, so both integration styles behave the
/// same, and a path without an origin has nowhere to mirror from.
#[derive(Debug, Default)]
pub struct RsyncBackend;

impl RsyncBackend {
    /// Create an rsync backend.
    pub fn new() -> Self {
        Self
    }
}

impl SyncBackend for RsyncBackend {
    fn update(
        &self,
        path: &SyncPath,
        origin: Option<&str>,
        _merge: MergeStyle,
        show_output: bool,
    ) -> Outcome {
        let Some(source) = origin else {
            tracing::warn!(path = path.as_str(), "rsync path has no origin to pull from");
            return Outcome::Failed;
        };
        run_tool(
            "rsync",
            &[flags(show_output), "--delete", source, path.as_str()],
            None,
            show_output,
        )
    }

    fn push(&self, path: &SyncPath, dest: Option<&str>, show_output: bool) -> Outcome {
        let Some(target) = dest else {
            tracing::warn!(path = path.as_str(), "rsync path has no origin to push to");
            return Outcome::Failed;
        };
        run_tool(
            "rsync",
            &[flags(show_output), "--delete", path.as_str(), target],
            None,
            show_output,
        )
    }

    fn resolve(&self, _path: &SyncPath, _show_output: bool) -> Outcome {
        Outcome::Unsupported
    }
}

/// Archive mode, skipping files newer at the destination; verbose listing
/// only when tool output is shown.
fn flags(show_output: bool) -> &'static str {
    if show_output {
        "-auv"
    } else {
        "-au"
    }
}
