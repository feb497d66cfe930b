//! The defaults command

use std::path::Path;

use colored::Colorize;
use schema_core::ValidationOptions;
use schema_providers::ProviderCatalog;

use super::Target;
use crate::error::Result;

/// Run the defaults command
///
/// The defaulted document is printed as YAML even when the input has
/// errors; a note on stderr says so.
pub fn run_defaults(catalog: &ProviderCatalog, file: &Path, provider: Option<&str>) -> Result<()> {
    let target = Target::resolve(Some(file), provider)?;
    let result = target.validate(catalog, provider, ValidationOptions::default())?;

    let errors = result.errors().count();
    if errors > 0 {
        eprintln!(
            "{} {} has {} validation error(s); run {} for details",
            "warning:".yellow().bold(),
            file.display(),
            errors,
            "gschema validate".cyan()
        );
    }

    print!("{}", serde_yaml::to_string(&result.normalized)?);
    Ok(())
}
