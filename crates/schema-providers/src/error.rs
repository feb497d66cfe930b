//! Error types for schema-providers

use std::path::PathBuf;

use crate::document::Format;

/// Result type for schema-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading schemas and documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] schema_core::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} content: {message}")]
    Parse { format: Format, message: String },

    #[error("Failed to parse {format} file at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid schema in {path}: {source}")]
    InvalidSchema {
        path: PathBuf,
        #[source]
        source: schema_core::Error,
    },

    #[error("Provider already registered: {name}")]
    DuplicateProvider { name: String },

    #[error("Unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("No project document in {path}")]
    NoProjectDocument { path: PathBuf },

    #[error("Not a project directory (or any of the parent directories): {start}")]
    ProjectNotFound { start: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
