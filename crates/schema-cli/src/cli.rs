//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Validate project and provider configuration against their schemas
#[derive(Parser, Debug)]
#[command(name = "gschema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory of extra provider schema definitions
    #[arg(long, global = true, env = "GSCHEMA_SCHEMAS", value_name = "DIR")]
    pub schemas: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate a configuration file
    ///
    /// Without FILE, the project enclosing the current directory is
    /// validated. Exits with status 1 when errors are found.
    ///
    /// Examples:
    ///   gschema validate
    ///   gschema validate garden.yml --format json
    ///   gschema validate k8s.yml --provider kubernetes
    Validate {
        /// Project or provider file (YAML, TOML or JSON)
        file: Option<PathBuf>,

        /// Validate FILE as a single provider entry
        #[arg(short, long, value_name = "NAME")]
        provider: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Report unknown fields as errors
        #[arg(long)]
        deny_unknown: bool,
    },

    /// Print a configuration file with schema defaults applied
    Defaults {
        /// Project or provider file
        file: PathBuf,

        /// Treat FILE as a single provider entry
        #[arg(short, long, value_name = "NAME")]
        provider: Option<String>,
    },

    /// Print the field reference of a schema
    Schema {
        /// Provider name, or `project`
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List registered providers
    Providers,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
