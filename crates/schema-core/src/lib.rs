//! Schema model, validation, and defaulting for provider configuration
//!
//! A schema is built once from a [`SchemaDefinition`] (or a [`FieldBuilder`])
//! and is immutable afterwards. Documents are validated against it with
//! [`validate`] and defaults-filled with [`apply_defaults`]; every problem
//! found is reported as a [`Violation`] addressed by a [`FieldPath`].
//!
//! ```
//! use schema_core::{FieldBuilder, apply_defaults, validate};
//! use serde_json::json;
//!
//! let schema = FieldBuilder::object("provider")
//!     .child(FieldBuilder::string("name").required())
//!     .child(FieldBuilder::string("namespace").default_value("default"))
//!     .build()
//!     .unwrap();
//!
//! let result = validate(&schema, &json!({}));
//! assert_eq!(result.violations.len(), 1);
//! assert_eq!(result.violations[0].path.to_string(), "name");
//!
//! assert_eq!(apply_defaults(&schema, &json!({})), json!({"namespace": "default"}));
//! ```

pub mod defaults;
pub mod error;
pub mod path;
pub mod report;
pub mod schema;
pub mod validate;
pub mod violation;

pub use defaults::apply_defaults;
pub use error::{Error, Result};
pub use path::{FieldPath, PathSegment};
pub use schema::{FieldBuilder, SchemaDefinition, SchemaKind, SchemaNode, value_kind};
pub use validate::{UnknownFieldPolicy, ValidationOptions, ValidationResult, Validator, validate};
pub use violation::{Severity, Violation, ViolationKind};

/// A parsed configuration document.
///
/// The core never deals with source syntax; callers parse YAML, TOML or JSON
/// into this tree before validating it.
pub type ConfigDocument = serde_json::Value;
