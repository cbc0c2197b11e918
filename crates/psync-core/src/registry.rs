//! Project registry: ordered projects with name and position lookups

use std::collections::HashMap;

use psync_fs::SyncPath;

use crate::config::{RawItem, RawProject};
use crate::error::{Error, Result};
use crate::project::{Project, ProjectItem, TrackedPath};

/// The full set of configured projects.
///
/// Declaration order is preserved and significant: anonymous projects are
/// addressed by their 1-based position, and the default selection runs in
/// declaration order.
#[derive(Debug)]
pub struct Registry {
    projects: Vec<Project>,
    names: HashMap<String, usize>,
    auto: Vec<usize>,
}

impl Registry {
    /// Build the registry from parsed configuration, canonicalizing every
    /// path. Fails when two projects share a name.
    pub fn from_raw(defs: Vec<RawProject>) -> Result<Self> {
        let mut projects = Vec::with_capacity(defs.len());
        let mut names = HashMap::new();

        for (index, def) in defs.into_iter().enumerate() {
            if let Some(name) = &def.name {
                if let Some(&first) = names.get(name) {
                    return Err(Error::DuplicateProject {
                        name: name.clone(),
                        first: first + 1,
                        second: index + 1,
                    });
                }
                names.insert(name.clone(), index);
            } else {
                tracing::warn!(
                    ordinal = index + 1,
                    "project has no name; it is addressable only by position"
                );
            }
            let items = def
                .items
                .into_iter()
                .map(|item| match item {
                    RawItem::Path { path, tool, origin } => ProjectItem::Path(TrackedPath {
                        path: SyncPath::new(&path),
                        tool,
                        origin,
                    }),
                    RawItem::Reference { name } => ProjectItem::Reference(name),
                })
                .collect();
            projects.push(Project {
                name: def.name,
                auto: def.auto,
                items,
            });
        }

        let auto = projects
            .iter()
            .enumerate()
            .filter(|(_, project)| project.auto)
            .map(|(index, _)| index)
            .collect();

        Ok(Self {
            projects,
            names,
            auto,
        })
    }

    /// All projects in declaration order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of configured projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the registry holds no projects at all.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Indices of the default selection, in declaration order.
    pub fn auto_indices(&self) -> &[usize] {
        &self.auto
    }

    /// Look up a project by name. References between projects resolve
    /// through this map only, never by position.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Resolve a user-supplied selector: a project name, or a 1-based
    /// position for projects without one. Names win over positions, so a
    /// project literally named `"2"` shadows the second slot.
    pub fn resolve(&self, selector: &str) -> Option<usize> {
        if let Some(index) = self.lookup(selector) {
            return Some(index);
        }
        let position: usize = selector.parse().ok()?;
        (1..=self.projects.len())
            .contains(&position)
            .then(|| position - 1)
    }
}
