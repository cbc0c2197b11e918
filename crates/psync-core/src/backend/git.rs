//! Git-backed synchronization

use chrono::Local;
use psync_fs::SyncPath;

use super::{capture_tool, run_tool, MergeStyle, Outcome, SyncBackend};

/// Remote used when a path names none.
const DEFAULT_REMOTE: &str = "origin";

/// Synchronizes version-controlled paths by shelling out to `git` with the
/// path as the working directory.
///
/// `update` pulls from the origin remote, rebasing or merging per the
/// requested style. `push` stages everything and, when the work tree is
/// dirty, snapshots a commit and sends it to the destination remote; a
/// clean tree succeeds without contacting the remote at all. Conflict
/// resolution is not implemented.
#[derive(Debug, Default)]
pub struct GitBackend;

impl GitBackend {
    /// Create a git backend.
    pub fn new() -> Self {
        Self
    }
}

impl SyncBackend for GitBackend {
    fn update(
        &self,
        path: &SyncPath,
        origin: Option<&str>,
        merge: MergeStyle,
        show_output: bool,
    ) -> Outcome {
        let remote = origin.unwrap_or(DEFAULT_REMOTE);
        let dir = path.to_native();
        let mut args = vec!["pull"];
        if merge == MergeStyle::Rebase {
            args.push("--rebase");
        }
        args.push(remote);
        run_tool("git", &args, Some(dir.as_path()), show_output)
    }

    fn push(&self, path: &SyncPath, dest: Option<&str>, show_output: bool) -> Outcome {
        let remote = dest.unwrap_or(DEFAULT_REMOTE);
        let dir = path.to_native();

        if run_tool("git", &["add", "--all"], Some(dir.as_path()), show_output)
            != Outcome::Success
        {
            return Outcome::Failed;
        }

        // Empty porcelain output means a clean tree; the push stops here
        // without contacting the remote.
        let Some(status) = capture_tool("git", &["status", "--porcelain"], &dir, show_output)
        else {
            return Outcome::Failed;
        };
        if status.trim().is_empty() {
            return Outcome::Success;
        }

        let message = commit_message();
        if run_tool(
            "git",
            &["commit", "-m", &message],
            Some(dir.as_path()),
            show_output,
        ) != Outcome::Success
        {
            return Outcome::Failed;
        }

        run_tool("git", &["push", remote], Some(dir.as_path()), show_output)
    }

    fn resolve(&self, _path: &SyncPath, _show_output: bool) -> Outcome {
        Outcome::Unsupported
    }
}

/// Commit message identifying the originating host and wall-clock time.
fn commit_message() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "psync commit from {} at {}",
        host,
        Local::now().format("%Y-%m-%d %H:%M:%S %z")
    )
}
