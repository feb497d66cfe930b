//! The validate command

use std::path::Path;

use colored::Colorize;
use schema_core::report::{format_violation, render_json};
use schema_core::{Severity, UnknownFieldPolicy, ValidationOptions, Violation};
use schema_providers::ProviderCatalog;

use super::Target;
use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

/// Run the validate command
pub fn run_validate(
    catalog: &ProviderCatalog,
    file: Option<&Path>,
    provider: Option<&str>,
    format: OutputFormat,
    deny_unknown: bool,
) -> Result<()> {
    let target = Target::resolve(file, provider)?;
    let options = ValidationOptions {
        unknown_fields: if deny_unknown {
            UnknownFieldPolicy::Deny
        } else {
            UnknownFieldPolicy::Warn
        },
    };
    let result = target.validate(catalog, provider, options)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render_json(&result.violations))?);
        }
        OutputFormat::Text => print_text(&target.source, &result.violations),
    }

    let errors = result.errors().count();
    if errors > 0 {
        return Err(CliError::Invalid { errors });
    }
    Ok(())
}

fn print_text(source: &Path, violations: &[Violation]) {
    for violation in violations {
        let label = match violation.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("{}: {}", label, format_violation(violation));
    }

    let errors = violations.iter().filter(|v| v.is_error()).count();
    let warnings = violations.len() - errors;
    if errors == 0 {
        println!(
            "{} {} ({} {})",
            "OK".green().bold(),
            source.display(),
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        );
    } else {
        println!(
            "{} {} ({} {}, {} {})",
            "FAILED".red().bold(),
            source.display(),
            errors,
            if errors == 1 { "error" } else { "errors" },
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        );
    }
}
