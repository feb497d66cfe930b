//! Schema model
//!
//! A [`SchemaNode`] tree describes the shape of a configuration document.
//! Trees are produced from a [`SchemaDefinition`] (usually loaded from a
//! YAML file) or a [`FieldBuilder`], and every structural rule is checked
//! while building, so a `SchemaNode` in hand is always well-formed.
//!
//! # Example YAML
//!
//! ```yaml
//! name: conftest
//! type: object
//! children:
//!   - name: policyPath
//!     type: string
//!     default: ./policy
//!   - name: testFailureThreshold
//!     type: string
//!     default: error
//!     allowedValues: [error, warn, none]
//! ```

mod builder;
mod definition;
mod kind;

pub use builder::FieldBuilder;
pub use definition::SchemaDefinition;
pub use kind::{SchemaKind, value_kind};

use regex::Regex;
use serde_json::Value;

use crate::path::{FieldPath, PathSegment};

/// One declarative field definition.
///
/// Immutable once built; share it by reference (or inside an `Arc`) across
/// any number of concurrent validations.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) name: String,
    pub(crate) kind: SchemaKind,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) allowed_values: Option<Vec<Value>>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) description: Option<String>,
    pub(crate) deprecated: Option<String>,
    pub(crate) replaced_by: Option<String>,
    pub(crate) children: Vec<SchemaNode>,
    pub(crate) variants: Vec<SchemaNode>,
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Deprecation message, if the field is deprecated.
    pub fn deprecated(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    /// Sibling field that supersedes this deprecated one.
    pub fn replaced_by(&self) -> Option<&str> {
        self.replaced_by.as_deref()
    }

    /// Named children of an object node, in declaration order.
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Alternatives of a union node, in the order they are tried.
    pub fn variants(&self) -> &[SchemaNode] {
        &self.variants
    }

    /// Named child of an object node.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        if self.kind != SchemaKind::Object {
            return None;
        }
        self.children.iter().find(|c| c.name == name)
    }

    /// Element schema of an array node. `None` for arrays of anything.
    pub fn element(&self) -> Option<&SchemaNode> {
        if self.kind != SchemaKind::Array {
            return None;
        }
        self.children.first()
    }

    /// Find the node a document path points at.
    ///
    /// Keys step into object children, indices into the array element
    /// schema, and union variants are searched in order. Returns `None`
    /// when the path leaves the schema (unknown keys, inside opaque nodes).
    ///
    /// ```
    /// use schema_core::{FieldBuilder, FieldPath};
    ///
    /// let schema = FieldBuilder::object("kubernetes")
    ///     .child(FieldBuilder::array(
    ///         "tlsCertificates",
    ///         FieldBuilder::object("certificate")
    ///             .child(FieldBuilder::string("name").required()),
    ///     ))
    ///     .build()
    ///     .unwrap();
    ///
    /// let node = schema.resolve(&FieldPath::parse("tlsCertificates[0].name")).unwrap();
    /// assert_eq!(node.name(), "name");
    /// assert!(schema.resolve(&FieldPath::parse("tlsCertificates.name")).is_none());
    /// ```
    pub fn resolve(&self, path: &FieldPath) -> Option<&SchemaNode> {
        resolve_segments(self, path.segments())
    }
}

fn resolve_segments<'a>(node: &'a SchemaNode, segments: &[PathSegment]) -> Option<&'a SchemaNode> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(node);
    };

    match (node.kind, first) {
        (SchemaKind::Union, _) => node
            .variants
            .iter()
            .find_map(|variant| resolve_segments(variant, segments)),
        (SchemaKind::Object, PathSegment::Key(key)) => {
            resolve_segments(node.child(key)?, rest)
        }
        (SchemaKind::Array, PathSegment::Index(_)) => resolve_segments(node.element()?, rest),
        _ => None,
    }
}
