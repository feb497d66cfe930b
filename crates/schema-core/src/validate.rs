//! Recursive-descent validation of documents against a schema
//!
//! Children are visited in schema-declared order and nothing short-circuits:
//! one call reports every problem in the document, in a stable order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::apply_defaults_with;
use crate::error::Error;
use crate::path::FieldPath;
use crate::schema::{SchemaKind, SchemaNode, value_kind};
use crate::violation::{Severity, Violation, ViolationKind};
use crate::ConfigDocument;

/// What to do with document keys the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Report as a warning
    #[default]
    Warn,
    /// Report as an error
    Deny,
    /// Do not report
    Allow,
}

impl FromStr for UnknownFieldPolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" | "warning" => Ok(UnknownFieldPolicy::Warn),
            "deny" | "error" => Ok(UnknownFieldPolicy::Deny),
            "allow" | "ignore" => Ok(UnknownFieldPolicy::Allow),
            _ => Err(Error::InvalidPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnknownFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownFieldPolicy::Warn => write!(f, "warn"),
            UnknownFieldPolicy::Deny => write!(f, "deny"),
            UnknownFieldPolicy::Allow => write!(f, "allow"),
        }
    }
}

/// Knobs for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Every violation found, in schema order
    pub violations: Vec<Violation>,
    /// The input with schema defaults applied
    pub normalized: ConfigDocument,
}

impl ValidationResult {
    /// True when no error-severity violation was found.
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_error())
    }
}

/// Validate `document` against `schema` with default options.
pub fn validate(schema: &SchemaNode, document: &ConfigDocument) -> ValidationResult {
    Validator::new(schema).validate(document)
}

/// Validator bound to one schema tree.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'s> {
    schema: &'s SchemaNode,
    options: ValidationOptions,
}

impl<'s> Validator<'s> {
    pub fn new(schema: &'s SchemaNode) -> Self {
        Self {
            schema,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn schema(&self) -> &'s SchemaNode {
        self.schema
    }

    pub fn validate(&self, document: &ConfigDocument) -> ValidationResult {
        let mut violations = Vec::new();
        self.check(self.schema, document, &FieldPath::root(), &mut violations);

        let errors = violations.iter().filter(|v| v.is_error()).count();
        tracing::debug!(
            schema = self.schema.name(),
            errors,
            warnings = violations.len() - errors,
            "validated document"
        );

        ValidationResult {
            violations,
            normalized: apply_defaults_with(self, document),
        }
    }

    /// First union variant `value` satisfies without errors.
    pub(crate) fn matching_variant<'n>(
        &self,
        node: &'n SchemaNode,
        value: &Value,
    ) -> Option<(&'n SchemaNode, Vec<Violation>)> {
        node.variants().iter().find_map(|variant| {
            let mut found = Vec::new();
            self.check(variant, value, &FieldPath::root(), &mut found);
            (!found.iter().any(Violation::is_error)).then_some((variant, found))
        })
    }

    fn check(&self, node: &SchemaNode, value: &Value, path: &FieldPath, out: &mut Vec<Violation>) {
        match node.kind() {
            SchemaKind::Opaque => return,
            SchemaKind::Union => return self.check_union(node, value, path, out),
            kind if !kind.accepts(value) => {
                out.push(type_mismatch(path, kind.as_str().to_string(), value));
                return;
            }
            _ => {}
        }

        if let Some(allowed) = node.allowed_values() {
            if !allowed.iter().any(|candidate| same_value(candidate, value)) {
                out.push(Violation::new(
                    path.clone(),
                    ViolationKind::InvalidEnumValue {
                        allowed: allowed.to_vec(),
                    },
                    format!(
                        "invalid value {value}, expected one of: {}",
                        list_values(allowed)
                    ),
                ));
            }
        }

        match value {
            Value::String(s) => {
                if let Some(pattern) = node.pattern() {
                    if !pattern.is_match(s) {
                        out.push(Violation::new(
                            path.clone(),
                            ViolationKind::PatternMismatch {
                                pattern: pattern.as_str().to_string(),
                            },
                            format!("value {value} does not match pattern `{}`", pattern.as_str()),
                        ));
                    }
                }
            }
            Value::Object(map) => self.check_object(node, map, path, out),
            Value::Array(items) => {
                if let Some(element) = node.element() {
                    for (idx, item) in items.iter().enumerate() {
                        self.check(element, item, &path.index(idx), out);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_object(
        &self,
        node: &SchemaNode,
        map: &Map<String, Value>,
        path: &FieldPath,
        out: &mut Vec<Violation>,
    ) {
        for child in node.children() {
            let child_path = path.key(child.name());
            let Some(value) = map.get(child.name()) else {
                if child.is_required() {
                    out.push(Violation::new(
                        child_path,
                        ViolationKind::MissingRequiredField,
                        "required field is missing",
                    ));
                }
                continue;
            };

            if let Some(message) = child.deprecated() {
                out.push(Violation::new(
                    child_path.clone(),
                    ViolationKind::DeprecatedField,
                    format!("field is deprecated: {message}"),
                ));
                if let Some(replacement) = child.replaced_by().filter(|r| map.contains_key(*r)) {
                    out.push(Violation::new(
                        child_path.clone(),
                        ViolationKind::ConflictingFields {
                            with: replacement.to_string(),
                        },
                        format!(
                            "cannot be set together with `{replacement}`, which replaces it"
                        ),
                    ));
                }
            }

            self.check(child, value, &child_path, out);
        }

        let severity = match self.options.unknown_fields {
            UnknownFieldPolicy::Allow => return,
            UnknownFieldPolicy::Warn => Severity::Warning,
            UnknownFieldPolicy::Deny => Severity::Error,
        };
        for key in map.keys().filter(|key| node.child(key).is_none()) {
            out.push(
                Violation::new(path.key(key.as_str()), ViolationKind::UnknownField, "unknown field")
                    .with_severity(severity),
            );
        }
    }

    fn check_union(
        &self,
        node: &SchemaNode,
        value: &Value,
        path: &FieldPath,
        out: &mut Vec<Violation>,
    ) {
        match self.matching_variant(node, value) {
            Some((_, warnings)) => out.extend(warnings.into_iter().map(|w| w.rebase(path))),
            None => {
                let expected = node
                    .variants()
                    .iter()
                    .map(|v| v.kind().as_str())
                    .collect::<Vec<_>>()
                    .join(" | ");
                out.push(type_mismatch(path, expected, value));
            }
        }
    }
}

fn type_mismatch(path: &FieldPath, expected: String, value: &Value) -> Violation {
    let found = value_kind(value).to_string();
    let message = format!("expected {expected}, found {found}");
    Violation::new(
        path.clone(),
        ViolationKind::TypeMismatch { expected, found },
        message,
    )
}

/// Enum membership. Numbers compare by magnitude so `1.0` matches `1`.
fn same_value(candidate: &Value, value: &Value) -> bool {
    match (candidate, value) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => candidate == value,
    }
}

fn list_values(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
