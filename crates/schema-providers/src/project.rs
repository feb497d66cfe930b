//! Project discovery
//!
//! Walks up from a directory until it finds a `garden.yml` (or
//! `garden.yaml`) holding a project document. Two forms are recognized:
//!
//! ```yaml
//! kind: Project
//! name: my-project
//! ```
//!
//! and the legacy nested form, which is lifted to the top level:
//!
//! ```yaml
//! project:
//!   name: my-project
//! ```
//!
//! A file may hold several `---`-separated documents; the first project
//! document wins and the rest (modules, workflows) are ignored here.
//! [`load_project_document`] applies the same rules to a file given
//! explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use schema_core::ConfigDocument;

use crate::document::{Format, load_document, parse_documents, with_path};
use crate::{Error, Result};

/// File names that may hold a project document, in lookup order.
pub const PROJECT_FILE_NAMES: [&str; 2] = ["garden.yml", "garden.yaml"];

/// A discovered project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Directory containing the project file
    pub root: PathBuf,
    /// The project file itself
    pub path: PathBuf,
    pub name: String,
    /// The project document, in `kind: Project` form
    pub document: ConfigDocument,
}

/// Find the project enclosing `start`.
pub fn find_project(start: &Path) -> Result<ProjectConfig> {
    let start = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;
    let mut current = start.as_path();

    loop {
        for file_name in PROJECT_FILE_NAMES {
            let path = current.join(file_name);
            if !path.is_file() {
                continue;
            }
            if let Some(project) = read_project(&path)? {
                tracing::info!(project = %project.name, root = %current.display(), "found project");
                return Ok(project);
            }
            tracing::debug!(path = %path.display(), "no project document in config file");
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(Error::ProjectNotFound { start: start.clone() }),
        }
    }
}

/// Read the named project document in `path`, if there is one.
///
/// Project documents without a non-empty `name` do not count, so discovery
/// keeps walking up past them.
pub fn read_project(path: &Path) -> Result<Option<ProjectConfig>> {
    let Some(document) = read_documents(path)?
        .into_iter()
        .filter_map(project_document)
        .find(has_name)
    else {
        return Ok(None);
    };
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(Some(ProjectConfig {
        root,
        path: path.to_path_buf(),
        name,
        document,
    }))
}

/// Load the project document of an explicitly named project file.
///
/// Unlike [`read_project`], a project without a usable `name` is returned
/// as is so validation can report it. A file with no project document at
/// all is an error.
pub fn load_project_document(path: &Path) -> Result<ConfigDocument> {
    read_documents(path)?
        .into_iter()
        .find_map(project_document)
        .ok_or_else(|| Error::NoProjectDocument {
            path: path.to_path_buf(),
        })
}

/// Every document in `path`. YAML files may hold several.
fn read_documents(path: &Path) -> Result<Vec<ConfigDocument>> {
    match Format::from_path(path)? {
        Format::Yaml => {
            let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            parse_documents(&source).map_err(|e| with_path(e, path))
        }
        Format::Toml | Format::Json => Ok(vec![load_document(path)?]),
    }
}

/// Return `document` in `kind: Project` form if it describes a project.
fn project_document(document: ConfigDocument) -> Option<ConfigDocument> {
    let Value::Object(mut map) = document else {
        return None;
    };

    if map.get("kind").and_then(Value::as_str) == Some("Project") {
        return Some(Value::Object(map));
    }

    if map.contains_key("kind") {
        return None;
    }
    let Some(Value::Object(legacy)) = map.remove("project") else {
        return None;
    };

    let mut lifted = Map::new();
    lifted.insert("kind".to_string(), Value::from("Project"));
    lifted.extend(legacy);
    for (key, value) in map {
        lifted.entry(key).or_insert(value);
    }
    Some(Value::Object(lifted))
}

fn has_name(document: &ConfigDocument) -> bool {
    document
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty())
}
