//! Validation and defaulting scenarios over YAML-defined schemas

use pretty_assertions::assert_eq;
use rstest::rstest;
use schema_core::{
    Error, SchemaDefinition, SchemaNode, Severity, ViolationKind, apply_defaults, validate,
};
use serde_json::{Value, json};

fn schema(yaml: &str) -> SchemaNode {
    let definition: SchemaDefinition = serde_yaml::from_str(yaml).unwrap();
    SchemaNode::from_definition(definition).unwrap()
}

fn doc(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).unwrap()
}

// ============================================================================
// Required fields and defaults
// ============================================================================

#[test]
fn test_missing_name_and_defaulted_namespace() {
    let schema = schema(
        r#"
type: object
children:
  - name: name
    type: string
    required: true
  - name: namespace
    type: string
    default: default
"#,
    );

    let result = validate(&schema, &json!({}));
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].path.to_string(), "name");
    assert_eq!(result.violations[0].kind, ViolationKind::MissingRequiredField);

    assert_eq!(apply_defaults(&schema, &json!({})), json!({"namespace": "default"}));
    assert_eq!(result.normalized, json!({"namespace": "default"}));
}

#[test]
fn test_failure_threshold_enum() {
    let schema = schema(
        r#"
type: object
children:
  - name: testFailureThreshold
    type: string
    default: error
    allowedValues: [error, warn, none]
"#,
    );

    let result = validate(&schema, &doc("testFailureThreshold: maybe"));
    assert_eq!(result.violations.len(), 1);
    assert_eq!(
        result.violations[0].kind,
        ViolationKind::InvalidEnumValue {
            allowed: vec![json!("error"), json!("warn"), json!("none")]
        }
    );
}

#[test]
fn test_tls_certificates_element_path() {
    let schema = schema(
        r#"
type: object
children:
  - name: tlsCertificates
    type: array
    children:
      - type: object
        children:
          - name: name
            type: string
            required: true
"#,
    );

    let result = validate(
        &schema,
        &doc(
            r#"
tlsCertificates:
  - {}
  - name: a
"#,
        ),
    );
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].path.to_string(), "tlsCertificates[0].name");
    assert_eq!(result.violations[0].kind, ViolationKind::MissingRequiredField);
}

// ============================================================================
// Schema definition errors
// ============================================================================

#[rstest]
#[case::required_with_default(
    r#"
children:
  - name: name
    type: string
    required: true
    default: x
"#,
    "name"
)]
#[case::two_element_schemas(
    r#"
children:
  - name: volumes
    type: array
    children:
      - type: string
      - type: object
"#,
    "volumes"
)]
#[case::children_on_opaque(
    r#"
children:
  - name: spec
    type: opaque
    children:
      - name: a
"#,
    "spec"
)]
#[case::empty_allowed_values(
    r#"
children:
  - name: mode
    type: string
    allowedValues: []
"#,
    "mode"
)]
#[case::allowed_values_on_object(
    r#"
children:
  - name: mode
    type: object
    allowedValues: [a]
"#,
    "mode"
)]
fn test_malformed_schemas_fail_fast(#[case] yaml: &str, #[case] expected_path: &str) {
    let definition: SchemaDefinition = serde_yaml::from_str(yaml).unwrap();
    match SchemaNode::from_definition(definition) {
        Err(Error::SchemaDefinition { path, .. }) => assert_eq!(path, expected_path),
        other => panic!("expected a schema definition error, got {other:?}"),
    }
}

// ============================================================================
// Nested documents
// ============================================================================

#[test]
fn test_all_problems_reported_in_one_pass() {
    let schema = schema(
        r#"
type: object
children:
  - name: context
    type: string
    required: true
  - name: resources
    type: object
    children:
      - name: builder
        type: object
        children:
          - name: limits
            type: object
            children:
              - name: cpu
                type: number
              - name: memory
                type: number
  - name: deploymentStrategy
    type: string
    allowedValues: [rolling]
"#,
    );

    let result = validate(
        &schema,
        &doc(
            r#"
resources:
  builder:
    limits:
      cpu: lots
      memory: "1Gi"
deploymentStrategy: blue-green
ingressClass: nginx
"#,
        ),
    );

    let reported: Vec<(String, Severity)> = result
        .violations
        .iter()
        .map(|v| (v.path.to_string(), v.severity))
        .collect();
    assert_eq!(
        reported,
        vec![
            ("context".to_string(), Severity::Error),
            ("resources.builder.limits.cpu".to_string(), Severity::Error),
            ("resources.builder.limits.memory".to_string(), Severity::Error),
            ("deploymentStrategy".to_string(), Severity::Error),
            ("ingressClass".to_string(), Severity::Warning),
        ]
    );
}

#[test]
fn test_repeated_validation_is_stable() {
    let schema = schema(
        r#"
type: object
children:
  - name: a
    type: number
  - name: b
    type: number
"#,
    );
    let document = doc("{b: x, a: w, z: 1, q: 2}");
    let first = validate(&schema, &document);
    for _ in 0..5 {
        assert_eq!(validate(&schema, &document), first);
    }
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = std::sync::Arc::new(schema(
        r#"
type: object
children:
  - name: name
    type: string
    required: true
"#,
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                let document = if i % 2 == 0 { json!({}) } else { json!({"name": "x"}) };
                validate(&schema, &document).is_valid()
            })
        })
        .collect();

    let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outcomes, vec![false, true, false, true]);
}
