//! Canonical path form for synchronization targets

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// If no home directory can be determined the input is returned verbatim
/// (with a warning), matching the usual shell-expansion fallback. `~user`
/// forms are not interpreted.
pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" || raw.starts_with("~/") {
        match dirs::home_dir() {
            Some(home) => {
                return if raw == "~" {
                    home
                } else {
                    home.join(&raw[2..])
                };
            }
            None => {
                tracing::warn!("could not determine home directory; leaving '~' unexpanded");
            }
        }
    }
    PathBuf::from(raw)
}

/// A synchronization target path in canonical form.
///
/// Canonicalization happens once, at construction:
///
/// - `~` prefixes are expanded to the home directory
/// - the path is lexically normalized (`.` dropped, `..` resolved against
///   preceding segments, separators collapsed) without touching the
///   filesystem, so nonexistent paths stay representable
/// - a trailing separator is appended if the path denotes an existing
///   directory at construction time
///
/// Two `SyncPath`s with the same canonical string are the same
/// synchronization unit regardless of which project declared them, so the
/// type derives `Eq` and `Hash` over the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncPath {
    /// Canonical representation, forward slashes only
    inner: String,
}

impl SyncPath {
    /// Build the canonical form of a raw config path.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let unified = raw.as_ref().replace('\\', "/");
        let expanded = expand_home(&unified);
        let mut inner = normalize_lexical(&expanded);
        if Path::new(&inner).is_dir() && !inner.ends_with('/') {
            inner.push('/');
        }
        Self { inner }
    }

    /// The canonical string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native `PathBuf` for I/O boundaries.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path currently exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Whether the path is currently a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }
}

impl AsRef<Path> for SyncPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for SyncPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for SyncPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SyncPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Lexically normalize a path: drop `.` segments, resolve `..` against the
/// segment before it (or drop it at an absolute root), collapse duplicate
/// separators. Purely string-level; the filesystem is never consulted.
fn normalize_lexical(path: &Path) -> String {
    let mut root = String::new();
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                root.push_str(&prefix.as_os_str().to_string_lossy().replace('\\', "/"));
            }
            Component::RootDir => root.push('/'),
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if !root.is_empty() => {
                    // ".." at an absolute root stays at the root
                }
                _ => parts.push("..".to_string()),
            },
            Component::Normal(segment) => {
                parts.push(segment.to_string_lossy().into_owned());
            }
        }
    }

    let mut out = root;
    out.push_str(&parts.join("/"));
    if out.is_empty() {
        out.push('.');
    }
    out
}
