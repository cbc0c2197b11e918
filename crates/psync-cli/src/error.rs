//! Error types for psync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a CLI run before or after the traversal.
///
/// Per-path sync failures never surface here; they live in the run report
/// and only influence the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from psync-core
    #[error(transparent)]
    Core(#[from] psync_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
