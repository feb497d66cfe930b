//! Loader for schema definition files
//!
//! A schema directory holds one definition per file, in any supported
//! format:
//!
//! ```text
//! schemas/
//!   my-provider.yml
//!   exec.toml
//!   pulumi.json
//! ```
//!
//! The file stem names the provider unless the definition sets `name`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use schema_core::{SchemaDefinition, SchemaNode};

use crate::document::{Format, load_typed};
use crate::{Error, Result};

/// Loads schema definitions from files and directories
#[derive(Debug, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and build the schema in one file.
    ///
    /// Returns the provider name together with the built schema.
    pub fn load_file(&self, path: &Path) -> Result<(String, SchemaNode)> {
        let mut definition: SchemaDefinition = load_typed(path)?;
        if definition.name.is_empty() {
            definition.name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string();
        }
        let name = definition.name.clone();

        let schema = SchemaNode::from_definition(definition).map_err(|source| Error::InvalidSchema {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(provider = %name, path = %path.display(), "loaded schema definition");
        Ok((name, schema))
    }

    /// Load every definition file in `dir`, keyed by provider name.
    ///
    /// Files that cannot be parsed are skipped with a warning so one broken
    /// file does not hide the rest; a file that parses but describes an
    /// invalid schema is an error. A missing directory yields no schemas.
    pub fn load_dir(&self, dir: &Path) -> Result<BTreeMap<String, SchemaNode>> {
        let mut schemas = BTreeMap::new();

        if !dir.exists() {
            return Ok(schemas);
        }

        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Format::from_path(path).is_ok())
            .collect();
        paths.sort();

        for path in paths {
            match self.load_file(&path) {
                Ok((name, schema)) => {
                    if schemas.contains_key(&name) {
                        return Err(Error::DuplicateProvider { name });
                    }
                    schemas.insert(name, schema);
                }
                Err(e @ Error::InvalidSchema { .. }) => return Err(e),
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }

        Ok(schemas)
    }
}
