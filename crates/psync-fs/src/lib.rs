//! Filesystem path handling for psync
//!
//! Provides the canonical [`SyncPath`] form shared by every crate: paths are
//! home-expanded and lexically normalized once, at construction time, and
//! compared as plain strings from then on.

pub mod path;

pub use path::{SyncPath, expand_home};
