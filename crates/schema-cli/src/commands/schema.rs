//! The schema command

use schema_core::report::{render_reference, schema_reference};
use schema_providers::ProviderCatalog;
use schema_providers::builtins::PROJECT_SCHEMA;

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

/// Run the schema command
pub fn run_schema(catalog: &ProviderCatalog, name: &str, format: OutputFormat) -> Result<()> {
    let schema = if name == PROJECT_SCHEMA {
        catalog.project_schema()
    } else {
        catalog.get(name).ok_or_else(|| {
            CliError::user(format!(
                "Unknown schema '{}'. Valid: {}, {}",
                name,
                PROJECT_SCHEMA,
                catalog.names().collect::<Vec<_>>().join(", ")
            ))
        })?
    };

    let entries = schema_reference(schema);
    match format {
        OutputFormat::Text => println!("{}", render_reference(&entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}
