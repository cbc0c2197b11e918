//! [`RemoteFixture`]: a bare origin repository with two working clones.
//!
//! The layout mirrors the setup the sync engine is built for: a central
//! remote, a `seed` clone used to author "someone else's" changes, and a
//! `clone` that plays the local path under synchronization. Everything
//! lives in one temporary directory and disappears with the fixture.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::git::{capture_git, commit_file, configure_identity, run_git};

/// A bare origin with a seeded history and two clones of it.
///
/// # Example
///
/// ```rust,no_run
/// use psync_test_utils::remote::RemoteFixture;
///
/// let fixture = RemoteFixture::new();
/// fixture.publish_change("shared.txt", "fresh\n", "remote edit");
/// // fixture.clone_dir() is now one commit behind the origin.
/// ```
pub struct RemoteFixture {
    temp: TempDir,
    origin: PathBuf,
    seed: PathBuf,
    clone: PathBuf,
}

impl Default for RemoteFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFixture {
    /// Build the origin, seed it with one commit, and make a second clone.
    ///
    /// The branch name is whatever the local git defaults to; nothing in
    /// the fixture depends on it.
    ///
    /// # Panics
    /// Panics if any filesystem or git operation fails.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let origin = root.join("origin.git");
        std::fs::create_dir(&origin).unwrap();
        run_git(&origin, &["init", "--bare"]);

        run_git(root, &["clone", "origin.git", "seed"]);
        let seed = root.join("seed");
        configure_identity(&seed);
        commit_file(&seed, "README.md", "# seed\n", "initial commit");
        run_git(&seed, &["push", "-u", "origin", "HEAD"]);

        run_git(root, &["clone", "origin.git", "clone"]);
        let clone = root.join("clone");
        configure_identity(&clone);

        Self {
            temp,
            origin,
            seed,
            clone,
        }
    }

    /// The bare origin repository.
    pub fn origin_dir(&self) -> &Path {
        &self.origin
    }

    /// The clone used to author remote-side changes.
    pub fn seed_dir(&self) -> &Path {
        &self.seed
    }

    /// The clone playing the local path under synchronization.
    pub fn clone_dir(&self) -> &Path {
        &self.clone
    }

    /// Root of the fixture's temporary directory.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Author a commit in the seed clone and publish it to the origin, so
    /// the work clone has something new to pull.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn publish_change(&self, name: &str, content: &str, message: &str) {
        commit_file(&self.seed, name, content, message);
        run_git(&self.seed, &["push", "origin"]);
    }

    /// One-line commit log of the work clone, newest first.
    pub fn clone_log(&self) -> String {
        capture_git(&self.clone, &["log", "--oneline"])
    }

    /// One-line commit log of the origin, newest first.
    pub fn origin_log(&self) -> String {
        capture_git(&self.origin, &["log", "--oneline"])
    }
}
