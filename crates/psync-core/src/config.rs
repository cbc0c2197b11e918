//! Configuration loading and lenient parsing
//!
//! The configuration is a TOML document with one `[[project]]` array of
//! tables. Parsing is deliberately forgiving: unrecognized keys and
//! malformed entries are skipped with a warning so one bad definition
//! cannot take the whole registry down. Only a document that fails to
//! parse at all, or whose `project` entry has the wrong shape, is fatal.
//!
//! ```toml
//! [[project]]
//! name = "dotfiles"
//!
//! [[project.item]]
//! path = "~/.config/nvim"
//!
//! [[project.item]]
//! path = "~/media/photos"
//! tool = "rsync"
//! origin = "backup:/srv/photos"
//!
//! [[project]]
//! name = "everything"
//! auto = "false"
//!
//! [[project.item]]
//! reference = "dotfiles"
//! ```

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A project definition as written in the configuration, before path
/// canonicalization and name indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProject {
    /// Optional display name; anonymous projects are addressed by position
    pub name: Option<String>,
    /// Whether the project is part of the default selection
    pub auto: bool,
    /// Items in declaration order
    pub items: Vec<RawItem>,
}

/// One configuration item: a filesystem path or a pointer to another project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawItem {
    /// A synchronizable filesystem location
    Path {
        /// Location as written; canonicalized later
        path: String,
        /// Backend key (`git`, `rsync`, ...); `None` means the default
        tool: Option<String>,
        /// Remote or source location handed to the backend
        origin: Option<String>,
    },
    /// A by-name pointer to another project
    Reference {
        /// Target project name, resolved at traversal time
        name: String,
    },
}

/// Read and parse the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<Vec<RawProject>> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse configuration text into raw project definitions.
///
/// Returns an error only when the document is not valid TOML or the
/// `project` entry is not an array of tables. Everything else degrades to
/// a warning and a skipped entry.
pub fn parse_config(content: &str) -> Result<Vec<RawProject>> {
    let root: toml::Table = toml::from_str(content)?;
    let mut projects = Vec::new();
    for (key, value) in &root {
        if !key.eq_ignore_ascii_case("project") {
            tracing::warn!(key, "ignoring unrecognized top-level entry");
            continue;
        }
        let defs = value.as_array().ok_or_else(|| Error::ConfigInvalid {
            message: format!("'{key}' must be an array of project tables"),
        })?;
        for def in defs {
            let ordinal = projects.len() + 1;
            match def.as_table() {
                Some(table) => projects.push(parse_project(table, ordinal)),
                None => {
                    tracing::warn!(ordinal, "ignoring project definition that is not a table");
                }
            }
        }
    }
    Ok(projects)
}

fn parse_project(table: &toml::Table, ordinal: usize) -> RawProject {
    let mut name = None;
    let mut auto = true;
    let mut items = Vec::new();

    for (key, value) in table {
        if key.eq_ignore_ascii_case("name") {
            match value.as_str() {
                Some(text) if !text.is_empty() => name = Some(text.to_string()),
                Some(_) => {
                    tracing::warn!(ordinal, "empty project name; treating project as anonymous");
                }
                None => {
                    tracing::warn!(ordinal, "project name must be a string; ignoring it");
                }
            }
        } else if key.eq_ignore_ascii_case("auto") {
            auto = parse_auto(value);
        } else if key.eq_ignore_ascii_case("item") {
            match value.as_array() {
                Some(entries) => {
                    items.extend(entries.iter().filter_map(|entry| parse_item(entry, ordinal)));
                }
                None => {
                    tracing::warn!(ordinal, "'item' must be an array of tables; ignoring it");
                }
            }
        } else {
            tracing::warn!(ordinal, key, "ignoring unrecognized project entry");
        }
    }

    RawProject { name, auto, items }
}

/// The auto flag accepts booleans and strings. Only an explicit boolean
/// `false`, `"false"` (any casing), or `"0"` opts a project out; any other
/// value, like the flag's absence, opts in.
fn parse_auto(value: &toml::Value) -> bool {
    match value {
        toml::Value::Boolean(flag) => *flag,
        toml::Value::String(text) => !(text.eq_ignore_ascii_case("false") || text == "0"),
        _ => true,
    }
}

fn parse_item(entry: &toml::Value, ordinal: usize) -> Option<RawItem> {
    let Some(table) = entry.as_table() else {
        tracing::warn!(ordinal, "ignoring project item that is not a table");
        return None;
    };
    if let Some(value) = get_ci(table, "path") {
        let Some(path) = value.as_str() else {
            tracing::warn!(ordinal, "ignoring path item whose path is not a string");
            return None;
        };
        return Some(RawItem::Path {
            path: path.to_string(),
            tool: string_entry(table, "tool"),
            origin: string_entry(table, "origin"),
        });
    }
    if let Some(value) = get_ci(table, "reference") {
        let Some(target) = value.as_str() else {
            tracing::warn!(ordinal, "ignoring reference item whose target is not a string");
            return None;
        };
        return Some(RawItem::Reference {
            name: target.to_string(),
        });
    }
    tracing::warn!(ordinal, "ignoring project item with neither 'path' nor 'reference'");
    None
}

/// Case-insensitive key lookup, matching how tags and attributes are matched
/// everywhere else in the configuration.
fn get_ci<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn string_entry(table: &toml::Table, key: &str) -> Option<String> {
    get_ci(table, key)
        .and_then(toml::Value::as_str)
        .map(str::to_string)
}
