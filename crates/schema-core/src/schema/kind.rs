//! Field kinds and value classification

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of value a schema node accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    #[default]
    Object,
    /// Sequence validated element-wise against a single element schema
    Array,
    /// Any one of a list of alternative schemas
    Union,
    /// Free-form passthrough, accepted without inspection
    Opaque,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::Union => "union",
            SchemaKind::Opaque => "opaque",
        }
    }

    /// String, number and boolean fields are scalars.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            SchemaKind::String | SchemaKind::Number | SchemaKind::Boolean
        )
    }

    /// Whether the shape of `value` fits this kind.
    ///
    /// Unions never match directly; their variants are checked instead.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            SchemaKind::String => value.is_string(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Boolean => value.is_boolean(),
            SchemaKind::Object => value.is_object(),
            SchemaKind::Array => value.is_array(),
            SchemaKind::Union => false,
            SchemaKind::Opaque => true,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the shape of a document value, as used in mismatch messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
