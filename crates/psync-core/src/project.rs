//! Project model: tracked paths, references, and their containers

use psync_fs::SyncPath;

/// A single synchronizable filesystem location.
#[derive(Debug, Clone)]
pub struct TrackedPath {
    /// Canonical location, shared across all projects that mention it
    pub path: SyncPath,
    /// Backend key; `None` selects the registry's default backend
    pub tool: Option<String>,
    /// Remote or source location; `None` lets the backend pick its own
    pub origin: Option<String>,
}

/// One entry of a project, in declaration order.
#[derive(Debug, Clone)]
pub enum ProjectItem {
    /// A filesystem location to hand to a backend
    Path(TrackedPath),
    /// A by-name pointer to another project, resolved at traversal time
    Reference(String),
}

/// A named (or anonymous) group of paths and references to other projects.
#[derive(Debug, Clone)]
pub struct Project {
    /// Display name; anonymous projects are addressed by position only
    pub name: Option<String>,
    /// Whether the project belongs to the default selection
    pub auto: bool,
    /// Items in declaration order
    pub items: Vec<ProjectItem>,
}

impl Project {
    /// User-facing identity: the name, or `project #N` (1-based) when
    /// anonymous.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("project #{}", index + 1),
        }
    }
}
