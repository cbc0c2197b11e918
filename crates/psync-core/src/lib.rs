//! Core model and traversal engine for psync
//!
//! This crate holds everything between the configuration file and the
//! external sync tools:
//!
//! - **Configuration**: lenient TOML parsing into raw project definitions
//! - **Registry**: ordered projects with name and position lookups
//! - **Backends**: pluggable per-path synchronization strategies (git and
//!   rsync ship by default)
//! - **SyncEngine**: the traversal that applies one operation across the
//!   project graph, deduplicating shared paths and terminating cycles
//!
//! # Architecture
//!
//! `psync-core` sits between the path layer and the CLI:
//!
//! ```text
//!     psync-cli
//!         |
//!    psync-core
//!         |
//!     psync-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use psync_core::{ApplyOptions, BackendSet, Registry, SilentProgress, SyncEngine};
//!
//! fn run() -> psync_core::Result<()> {
//!     let defs = psync_core::load_config("~/.psync/config.toml".as_ref())?;
//!     let registry = Registry::from_raw(defs)?;
//!     let engine = SyncEngine::new(registry, BackendSet::with_defaults());
//!     let report = engine.update(None, &ApplyOptions::default(), &mut SilentProgress);
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod progress;
pub mod project;
pub mod registry;
pub mod report;

pub use backend::{BackendSet, GitBackend, MergeStyle, Outcome, RsyncBackend, SyncBackend};
pub use config::{RawItem, RawProject, load_config, parse_config};
pub use engine::{ApplyOptions, Operation, SyncEngine};
pub use error::{Error, Result};
pub use progress::{Progress, SilentProgress};
pub use project::{Project, ProjectItem, TrackedPath};
pub use registry::Registry;
pub use report::RunReport;
