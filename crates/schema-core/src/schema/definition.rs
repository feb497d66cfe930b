//! Plain nested schema definitions and their conversion to [`SchemaNode`]s

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{SchemaKind, SchemaNode};
use crate::validate::{UnknownFieldPolicy, ValidationOptions, Validator};
use crate::{Error, Result};

/// Serializable description of a field and its children.
///
/// This is the on-disk form of a schema. Field names follow the reference
/// docs (`type`, `allowedValues`, `replacedBy`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDefinition {
    /// Key of this field in its parent object
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SchemaKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    /// Regular expression string values must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
    /// Object fields, or the single element schema of an array
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaDefinition>,
    /// Alternatives of a union
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<SchemaDefinition>,
}

impl SchemaNode {
    /// Build a schema tree, checking every structural rule.
    ///
    /// Fails on the first malformed node with [`Error::SchemaDefinition`],
    /// whose path is given in breadcrumb notation.
    pub fn from_definition(definition: SchemaDefinition) -> Result<SchemaNode> {
        build(definition, "")
    }
}

impl TryFrom<SchemaDefinition> for SchemaNode {
    type Error = Error;

    fn try_from(definition: SchemaDefinition) -> Result<Self> {
        SchemaNode::from_definition(definition)
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn build(def: SchemaDefinition, path: &str) -> Result<SchemaNode> {
    let kind = def.kind;

    if def.required && def.default.is_some() {
        return Err(Error::definition(
            path,
            "a required field cannot also declare a default",
        ));
    }
    if def.deprecated.is_some() && def.default.is_some() {
        return Err(Error::definition(
            path,
            "a deprecated field cannot declare a default",
        ));
    }
    if def.replaced_by.is_some() && def.deprecated.is_none() {
        return Err(Error::definition(
            path,
            "replacedBy is only valid on deprecated fields",
        ));
    }

    match kind {
        SchemaKind::Array if def.children.len() > 1 => {
            return Err(Error::definition(
                path,
                format!(
                    "array declares {} element schemas; at most one is allowed",
                    def.children.len()
                ),
            ));
        }
        SchemaKind::Object | SchemaKind::Array => {}
        _ if !def.children.is_empty() => {
            return Err(Error::definition(
                path,
                format!("{kind} fields cannot declare children"),
            ));
        }
        _ => {}
    }

    match (kind, def.variants.is_empty()) {
        (SchemaKind::Union, true) => {
            return Err(Error::definition(path, "union declares no variants"));
        }
        (SchemaKind::Union, false) => {}
        (_, false) => {
            return Err(Error::definition(
                path,
                format!("{kind} fields cannot declare variants"),
            ));
        }
        (_, true) => {}
    }

    if let Some(allowed) = &def.allowed_values {
        if !kind.is_scalar() {
            return Err(Error::definition(
                path,
                format!("allowedValues is not supported on {kind} fields"),
            ));
        }
        if allowed.is_empty() {
            return Err(Error::definition(path, "allowedValues must not be empty"));
        }
        if let Some(bad) = allowed.iter().find(|v| !kind.accepts(v)) {
            return Err(Error::definition(
                path,
                format!("allowed value {bad} is not a {kind}"),
            ));
        }
    }

    let pattern = match def.pattern {
        Some(_) if kind != SchemaKind::String => {
            return Err(Error::definition(
                path,
                format!("pattern is not supported on {kind} fields"),
            ));
        }
        Some(source) => Some(Regex::new(&source).map_err(|e| {
            Error::definition(path, format!("invalid pattern `{source}`: {e}"))
        })?),
        None => None,
    };

    let children = match kind {
        SchemaKind::Array => def
            .children
            .into_iter()
            .map(|element| build(element, &format!("{path}[]")))
            .collect::<Result<Vec<_>>>()?,
        _ => build_fields(def.children, path)?,
    };

    let variants = def
        .variants
        .into_iter()
        .map(|variant| build(variant, path))
        .collect::<Result<Vec<_>>>()?;

    let node = SchemaNode {
        name: def.name,
        kind,
        required: def.required,
        default: None,
        allowed_values: def.allowed_values,
        pattern,
        description: def.description,
        deprecated: def.deprecated,
        replaced_by: def.replaced_by,
        children,
        variants,
    };

    match def.default {
        Some(default) => check_default(node, default, path),
        None => Ok(node),
    }
}

/// Build the named children of an object, enforcing unique names and
/// checking that every `replacedBy` points at a sibling.
fn build_fields(fields: Vec<SchemaDefinition>, parent: &str) -> Result<Vec<SchemaNode>> {
    let mut seen = HashSet::new();
    for field in &fields {
        if field.name.is_empty() {
            return Err(Error::definition(parent, "field name must not be empty"));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(Error::definition(
                child_path(parent, &field.name),
                "duplicate field name",
            ));
        }
    }
    for field in &fields {
        if let Some(target) = &field.replaced_by {
            if target == &field.name || !seen.contains(target.as_str()) {
                return Err(Error::definition(
                    child_path(parent, &field.name),
                    format!("replacedBy names unknown sibling `{target}`"),
                ));
            }
        }
    }

    fields
        .into_iter()
        .map(|field| {
            let path = child_path(parent, &field.name);
            build(field, &path)
        })
        .collect()
}

/// A default must itself be a valid value for its node.
///
/// It is checked under the strictest options and may not produce even a
/// warning, so defaulting never adds violations whatever policy a caller
/// validates with.
fn check_default(mut node: SchemaNode, default: Value, path: &str) -> Result<SchemaNode> {
    let result = Validator::new(&node)
        .with_options(ValidationOptions {
            unknown_fields: UnknownFieldPolicy::Deny,
        })
        .validate(&default);
    if let Some(first) = result.violations.first() {
        return Err(Error::definition(
            path,
            format!("default does not satisfy the field's own schema: {first}"),
        ));
    }
    node.default = Some(default);
    Ok(node)
}
