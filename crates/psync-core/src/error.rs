//! Error types for psync-core

use std::path::PathBuf;

/// Result type for psync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration and building the registry.
///
/// Per-path synchronization failures are deliberately not represented here:
/// they are [`Outcome`](crate::backend::Outcome) values folded into the
/// [`RunReport`](crate::report::RunReport) so one broken path cannot abort
/// a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file does not exist at the resolved location
    #[error("configuration not found at {path}")]
    ConfigNotFound {
        /// Location that was checked
        path: PathBuf,
    },

    /// Configuration file exists but its overall shape is unusable
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of the structural problem
        message: String,
    },

    /// Two project definitions share a display name
    #[error("duplicate project name '{name}' (definitions #{first} and #{second})")]
    DuplicateProject {
        /// The contested name
        name: String,
        /// 1-based position of the first definition
        first: usize,
        /// 1-based position of the conflicting definition
        second: usize,
    },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
