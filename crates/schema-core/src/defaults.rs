//! Defaulting engine
//!
//! Fills in absent optional fields from schema defaults. Explicit values are
//! never touched, and defaulting an already-defaulted document changes
//! nothing.

use serde_json::Value;

use crate::ConfigDocument;
use crate::schema::{SchemaKind, SchemaNode};
use crate::validate::Validator;

/// Return a copy of `document` with every applicable default inserted.
///
/// Defaults are inserted as owned copies, then defaulted themselves, so an
/// object default picks up the defaults of its own children. Values whose
/// shape does not match the schema are left as they are.
pub fn apply_defaults(schema: &SchemaNode, document: &ConfigDocument) -> ConfigDocument {
    apply_defaults_with(&Validator::new(schema), document)
}

/// Defaulting using `validator`'s options to pick union variants.
pub(crate) fn apply_defaults_with(validator: &Validator<'_>, document: &ConfigDocument) -> ConfigDocument {
    let mut normalized = document.clone();
    fill(validator, validator.schema(), &mut normalized);
    normalized
}

fn fill(validator: &Validator<'_>, node: &SchemaNode, value: &mut Value) {
    match (node.kind(), value) {
        (SchemaKind::Object, Value::Object(map)) => {
            for child in node.children() {
                if !map.contains_key(child.name()) {
                    let Some(default) = child.default_value() else {
                        continue;
                    };
                    // A present deprecated predecessor stands in for its replacement.
                    if superseded_by_present(node, child, map) {
                        continue;
                    }
                    map.insert(child.name().to_string(), default.clone());
                }
                if let Some(present) = map.get_mut(child.name()) {
                    fill(validator, child, present);
                }
            }
        }
        (SchemaKind::Array, Value::Array(items)) => {
            if let Some(element) = node.element() {
                for item in items.iter_mut() {
                    fill(validator, element, item);
                }
            }
        }
        (SchemaKind::Union, value) => {
            if let Some((variant, _)) = validator.matching_variant(node, value) {
                fill(validator, variant, value);
            }
        }
        _ => {}
    }
}

fn superseded_by_present(
    parent: &SchemaNode,
    child: &SchemaNode,
    map: &serde_json::Map<String, Value>,
) -> bool {
    parent.children().iter().any(|sibling| {
        sibling.replaced_by() == Some(child.name()) && map.contains_key(sibling.name())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kubernetes() -> SchemaNode {
        FieldBuilder::object("kubernetes")
            .child(FieldBuilder::string("namespace").default_value("default"))
            .child(
                FieldBuilder::object("resources")
                    .default_value(json!({}))
                    .child(
                        FieldBuilder::object("builder")
                            .default_value(json!({}))
                            .child(
                                FieldBuilder::object("limits")
                                    .default_value(json!({}))
                                    .child(FieldBuilder::number("cpu").default_value(4000))
                                    .child(FieldBuilder::number("memory").default_value(8192)),
                            ),
                    ),
            )
            .child(FieldBuilder::array(
                "tlsCertificates",
                FieldBuilder::object("certificate")
                    .child(FieldBuilder::string("name").required())
                    .child(FieldBuilder::string("managedBy").default_value("none")),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_document_gets_all_defaults() {
        let normalized = apply_defaults(&kubernetes(), &json!({}));
        assert_eq!(
            normalized,
            json!({
                "namespace": "default",
                "resources": {"builder": {"limits": {"cpu": 4000, "memory": 8192}}}
            })
        );
    }

    #[test]
    fn test_partial_object_gets_partial_defaults() {
        let doc = json!({"resources": {"builder": {"limits": {"cpu": 1000}}}});
        let normalized = apply_defaults(&kubernetes(), &doc);
        assert_eq!(
            normalized["resources"]["builder"]["limits"],
            json!({"cpu": 1000, "memory": 8192})
        );
    }

    #[test]
    fn test_array_elements_are_defaulted() {
        let doc = json!({"tlsCertificates": [{"name": "a"}, {"name": "b", "managedBy": "cert-manager"}]});
        let normalized = apply_defaults(&kubernetes(), &doc);
        assert_eq!(
            normalized["tlsCertificates"],
            json!([
                {"name": "a", "managedBy": "none"},
                {"name": "b", "managedBy": "cert-manager"}
            ])
        );
    }

    #[test]
    fn test_explicit_values_are_kept_even_when_wrong() {
        let doc = json!({"namespace": 7, "resources": "big"});
        let normalized = apply_defaults(&kubernetes(), &doc);
        assert_eq!(normalized, json!({"namespace": 7, "resources": "big"}));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let doc = json!({});
        let _ = apply_defaults(&kubernetes(), &doc);
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_defaults_are_not_shared_between_documents() {
        let schema = kubernetes();
        let mut first = apply_defaults(&schema, &json!({}));
        first["resources"]["builder"]["limits"]["cpu"] = json!(1);
        let second = apply_defaults(&schema, &json!({}));
        assert_eq!(second["resources"]["builder"]["limits"]["cpu"], json!(4000));
        assert_eq!(schema.child("resources").unwrap().default_value(), Some(&json!({})));
    }

    #[test]
    fn test_union_defaults_follow_matching_variant() {
        let schema = FieldBuilder::object("p")
            .child(FieldBuilder::union(
                "cache",
                [
                    FieldBuilder::boolean("enabled"),
                    FieldBuilder::object("settings")
                        .child(FieldBuilder::string("mode").default_value("local")),
                ],
            ))
            .build()
            .unwrap();

        assert_eq!(
            apply_defaults(&schema, &json!({"cache": {}})),
            json!({"cache": {"mode": "local"}})
        );
        assert_eq!(
            apply_defaults(&schema, &json!({"cache": true})),
            json!({"cache": true})
        );
    }

    #[test]
    fn test_replacement_default_skipped_when_deprecated_field_present() {
        let schema = FieldBuilder::object("project")
            .child(FieldBuilder::string("dotIgnoreFile").default_value(".gardenignore"))
            .child(
                FieldBuilder::array("dotIgnoreFiles", FieldBuilder::string("file"))
                    .deprecated("use dotIgnoreFile")
                    .replaced_by("dotIgnoreFile"),
            )
            .build()
            .unwrap();

        let legacy = json!({"dotIgnoreFiles": [".ignore"]});
        assert_eq!(apply_defaults(&schema, &legacy), legacy);
        assert_eq!(
            apply_defaults(&schema, &json!({})),
            json!({"dotIgnoreFile": ".gardenignore"})
        );
    }

    #[test]
    fn test_non_object_root_is_untouched() {
        assert_eq!(apply_defaults(&kubernetes(), &json!("x")), json!("x"));
    }
}
