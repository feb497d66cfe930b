//! Provider schemas for project configuration
//!
//! This crate wires [`schema_core`] to the outside world:
//!
//! - [`ProviderCatalog`]: the project schema plus the provider schemas,
//!   built-in and user-supplied
//! - [`document`]: YAML, TOML and JSON parsing into a [`ConfigDocument`]
//! - [`SchemaLoader`]: schema definition files on disk
//! - [`find_project`]: project discovery from a working directory
//!
//! [`ConfigDocument`]: schema_core::ConfigDocument

pub mod builtins;
pub mod catalog;
pub mod document;
pub mod error;
pub mod loader;
pub mod project;

pub use catalog::ProviderCatalog;
pub use document::{Format, load_document, parse_document, parse_documents};
pub use error::{Error, Result};
pub use loader::SchemaLoader;
pub use project::{ProjectConfig, find_project, load_project_document, read_project};
