//! Command implementations for schema-cli

pub mod defaults;
pub mod providers;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use schema_core::{ConfigDocument, ValidationOptions, ValidationResult};
use schema_providers::{ProviderCatalog, find_project, load_document, load_project_document};

use crate::error::Result;

pub use defaults::run_defaults;
pub use providers::run_providers;
pub use schema::run_schema;
pub use validate::run_validate;

/// Built-in catalog, extended with the definitions in `schemas` if given.
pub fn load_catalog(schemas: Option<&Path>) -> Result<ProviderCatalog> {
    let mut catalog = ProviderCatalog::with_builtins()?;
    if let Some(dir) = schemas {
        let added = catalog.register_dir(dir)?;
        tracing::debug!(dir = %dir.display(), added, "registered user schemas");
    }
    Ok(catalog)
}

/// The document to work on and where it came from.
pub(crate) struct Target {
    pub source: PathBuf,
    pub document: ConfigDocument,
}

impl Target {
    /// Load `file`, or discover the project from the current directory.
    ///
    /// A file validated as a project goes through the same project document
    /// rules as discovery; a provider file is read as a single document.
    pub fn resolve(file: Option<&Path>, provider: Option<&str>) -> Result<Self> {
        match file {
            Some(path) => Ok(Self {
                source: path.to_path_buf(),
                document: match provider {
                    Some(_) => load_document(path)?,
                    None => load_project_document(path)?,
                },
            }),
            None => {
                let cwd = std::env::current_dir()?;
                let project = find_project(&cwd)?;
                Ok(Self {
                    source: project.path,
                    document: project.document,
                })
            }
        }
    }

    /// Validate as a provider entry when `provider` is set, else as a project.
    pub fn validate(
        &self,
        catalog: &ProviderCatalog,
        provider: Option<&str>,
        options: ValidationOptions,
    ) -> Result<ValidationResult> {
        match provider {
            Some(name) => Ok(catalog.validate_provider(name, &self.document, options)?),
            None => Ok(catalog.validate_project(&self.document, options)),
        }
    }
}
