//! Path-addressable reporting of violations and schema references
//!
//! Everything here is a pure function over violations or schema nodes.

use serde::Serialize;
use serde_json::{Value, json};

use crate::path::FieldPath;
use crate::schema::{SchemaKind, SchemaNode};
use crate::violation::{Severity, Violation};

/// `"<path>: <message>"`, with the root path shown as `<root>`.
pub fn format_violation(violation: &Violation) -> String {
    violation.to_string()
}

/// One line per violation plus a summary line.
///
/// ```text
/// error: name: required field is missing
/// warning: extra: unknown field
/// 1 error, 1 warning
/// ```
pub fn render_text(violations: &[Violation]) -> String {
    let mut out = String::new();
    for violation in violations {
        out.push_str(&format!("{}: {}\n", violation.severity, format_violation(violation)));
    }

    let errors = violations.iter().filter(|v| v.is_error()).count();
    let warnings = violations.len() - errors;
    out.push_str(&format!(
        "{} {}, {} {}",
        errors,
        plural(errors, "error"),
        warnings,
        plural(warnings, "warning")
    ));
    out
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Machine-readable violations for editor and CI integration.
pub fn render_json(violations: &[Violation]) -> Value {
    let entries: Vec<Value> = violations
        .iter()
        .map(|v| {
            let mut entry = serde_json::to_value(v).unwrap_or_else(|_| json!({}));
            if let Value::Object(map) = &mut entry {
                map.insert("schemaPath".to_string(), json!(v.path.schema_notation()));
            }
            entry
        })
        .collect();

    let errors = violations.iter().filter(|v| v.severity == Severity::Error).count();
    json!({
        "valid": errors == 0,
        "errors": errors,
        "warnings": violations.len() - errors,
        "violations": entries,
    })
}

/// One row of a schema reference page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    /// Breadcrumb path, e.g. `tlsCertificates[].name`
    pub path: String,
    pub kind: SchemaKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

/// Flatten a schema into reference rows, parents before children.
///
/// The root itself is not listed. Union variants contribute their nested
/// fields under the union's own path.
pub fn schema_reference(schema: &SchemaNode) -> Vec<ReferenceEntry> {
    let mut entries = Vec::new();
    collect_nested(schema, &FieldPath::root(), &mut entries);
    entries
}

fn collect(node: &SchemaNode, path: &FieldPath, entries: &mut Vec<ReferenceEntry>) {
    entries.push(ReferenceEntry {
        path: path.schema_notation(),
        kind: node.kind(),
        required: node.is_required(),
        default: node.default_value().cloned(),
        allowed_values: node.allowed_values().map(<[Value]>::to_vec),
        description: node.description().map(str::to_string),
        deprecated: node.deprecated().map(str::to_string),
    });
    collect_nested(node, path, entries);
}

fn collect_nested(node: &SchemaNode, path: &FieldPath, entries: &mut Vec<ReferenceEntry>) {
    match node.kind() {
        SchemaKind::Object => {
            for child in node.children() {
                collect(child, &path.key(child.name()), entries);
            }
        }
        SchemaKind::Array => {
            if let Some(element) = node.element() {
                collect_nested(element, &path.index(0), entries);
            }
        }
        SchemaKind::Union => {
            for variant in node.variants() {
                collect_nested(variant, path, entries);
            }
        }
        _ => {}
    }
}

/// Render reference rows as the plain-text listing printed by the CLI.
pub fn render_reference(entries: &[ReferenceEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let mut line = format!("{} ({})", entry.path, entry.kind);
            if entry.required {
                line.push_str(" required");
            }
            if let Some(default) = &entry.default {
                line.push_str(&format!(" default={default}"));
            }
            if let Some(allowed) = &entry.allowed_values {
                let allowed: Vec<String> = allowed.iter().map(Value::to_string).collect();
                line.push_str(&format!(" allowed=[{}]", allowed.join(", ")));
            }
            if entry.deprecated.is_some() {
                line.push_str(" deprecated");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldBuilder, validate};

    fn schema() -> SchemaNode {
        FieldBuilder::object("kubernetes")
            .child(FieldBuilder::string("name").required())
            .child(
                FieldBuilder::string("testFailureThreshold")
                    .default_value("error")
                    .allowed_values(["error", "warn", "none"]),
            )
            .child(FieldBuilder::array(
                "tlsCertificates",
                FieldBuilder::object("certificate")
                    .child(FieldBuilder::string("name").required()),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let result = validate(
            &schema(),
            &serde_json::json!({
                "testFailureThreshold": "maybe",
                "tlsCertificates": [{}],
                "extra": 1
            }),
        );
        insta::assert_snapshot!(render_text(&result.violations), @r###"
        error: name: required field is missing
        error: testFailureThreshold: invalid value "maybe", expected one of: "error", "warn", "none"
        error: tlsCertificates[0].name: required field is missing
        warning: extra: unknown field
        3 errors, 1 warning
        "###);
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "0 errors, 0 warnings");
    }

    #[test]
    fn test_render_json_includes_schema_path() {
        let result = validate(&schema(), &serde_json::json!({"name": "a", "tlsCertificates": [{}, {}]}));
        let rendered = render_json(&result.violations);
        assert_eq!(rendered["valid"], json!(false));
        assert_eq!(rendered["errors"], json!(2));
        assert_eq!(rendered["violations"][1]["path"], json!("tlsCertificates[1].name"));
        assert_eq!(
            rendered["violations"][1]["schemaPath"],
            json!("tlsCertificates[].name")
        );
        assert_eq!(rendered["violations"][1]["kind"], json!("missingRequiredField"));
    }

    #[test]
    fn test_schema_reference() {
        let entries = schema_reference(&schema());
        insta::assert_snapshot!(render_reference(&entries), @r###"
        name (string) required
        testFailureThreshold (string) default="error" allowed=["error", "warn", "none"]
        tlsCertificates (array)
        tlsCertificates[].name (string) required
        "###);
    }
}
