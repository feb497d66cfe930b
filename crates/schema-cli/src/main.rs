//! gschema
//!
//! Validates project and provider configuration files against their
//! schemas and prints defaulted documents and schema references.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let catalog = commands::load_catalog(cli.schemas.as_deref())?;

    match cli.command {
        Commands::Validate {
            file,
            provider,
            format,
            deny_unknown,
        } => commands::run_validate(
            &catalog,
            file.as_deref(),
            provider.as_deref(),
            format,
            deny_unknown,
        ),
        Commands::Defaults { file, provider } => {
            commands::run_defaults(&catalog, &file, provider.as_deref())
        }
        Commands::Schema { name, format } => commands::run_schema(&catalog, &name, format),
        Commands::Providers => commands::run_providers(&catalog),
    }
}
