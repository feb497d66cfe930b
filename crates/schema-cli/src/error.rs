//! Error types for schema-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from schema-providers
    #[error(transparent)]
    Providers(#[from] schema_providers::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document has error-severity violations
    #[error("validation failed with {errors} {}", noun(.errors))]
    Invalid { errors: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

fn noun(errors: &usize) -> &'static str {
    if *errors == 1 { "error" } else { "errors" }
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_pluralizes() {
        assert_eq!(CliError::Invalid { errors: 1 }.to_string(), "validation failed with 1 error");
        assert_eq!(CliError::Invalid { errors: 3 }.to_string(), "validation failed with 3 errors");
    }
}
