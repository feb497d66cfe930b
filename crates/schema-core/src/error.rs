//! Error types for schema-core

/// Result type for schema-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building schemas or parsing options.
///
/// Validation itself never fails; problems in documents are reported as
/// [`crate::Violation`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid schema definition at {path}: {reason}")]
    SchemaDefinition { path: String, reason: String },

    #[error("Invalid unknown-field policy: {value} (expected warn, deny or allow)")]
    InvalidPolicy { value: String },
}

impl Error {
    pub fn definition(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        Self::SchemaDefinition {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path
            },
            reason: reason.into(),
        }
    }
}
