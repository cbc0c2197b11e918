//! Low-level git CLI helpers for test fixtures.
//!
//! Every helper panics with a descriptive message on failure. These run
//! inside tests only, where a broken fixture should abort loudly.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Run a git command in `repo` and panic unless it succeeds.
///
/// # Panics
/// Panics with git's stderr if the command cannot be run or exits nonzero.
pub fn run_git(repo: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` in {} failed:\n{}",
            repo.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Run a git command in `repo` and return its stdout.
///
/// # Panics
/// Panics with git's stderr if the command cannot be run or exits nonzero.
pub fn capture_git(repo: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .unwrap_or_else(|e| panic!("capture_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "capture_git: `git {args:?}` in {} failed:\n{}",
            repo.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Configure the identity and signing settings every test commit needs.
pub fn configure_identity(repo: &Path) {
    run_git(repo, &["config", "user.email", "test@test.com"]);
    run_git(repo, &["config", "user.name", "Test User"]);
    run_git(repo, &["config", "commit.gpgsign", "false"]);
}

/// Write `content` to `name` inside `repo`, stage everything, and commit.
///
/// # Panics
/// Panics if the file cannot be written or any git operation fails.
pub fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    fs::write(repo.join(name), content)
        .unwrap_or_else(|e| panic!("commit_file: failed to write {name}: {e}"));
    run_git(repo, &["add", "--all"]);
    run_git(repo, &["commit", "-m", message]);
}
