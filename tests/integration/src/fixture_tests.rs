//! End-to-end tests over the fixture projects
//!
//! Each test goes through the whole pipeline: project discovery, document
//! parsing, project validation, provider dispatch and defaulting.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;

use schema_core::report::render_text;
use schema_core::{FieldPath, PathSegment, Severity, ValidationOptions, ValidationResult};
use schema_providers::{ProviderCatalog, find_project};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/projects")
        .join(name)
}

fn validate_fixture(catalog: &ProviderCatalog, name: &str) -> ValidationResult {
    let project = find_project(&fixture(name)).unwrap();
    catalog.validate_project(&project.document, ValidationOptions::default())
}

fn paths(result: &ValidationResult) -> Vec<String> {
    result.violations.iter().map(|v| v.path.to_string()).collect()
}

#[test]
fn test_valid_stack_from_module_directory() {
    let project = find_project(&fixture("valid-stack/services/api")).unwrap();
    assert_eq!(project.name, "valid-stack");
    assert!(project.root.ends_with("valid-stack"));

    let catalog = ProviderCatalog::with_builtins().unwrap();
    let result = catalog.validate_project(&project.document, ValidationOptions::default());
    assert!(result.violations.is_empty(), "{}", render_text(&result.violations));

    let normalized = &result.normalized;
    assert_eq!(normalized["apiVersion"], json!("garden.io/v1"));
    assert_eq!(normalized["environments"][0]["production"], json!(false));
    assert_eq!(normalized["environments"][1]["production"], json!(true));

    let kubernetes = &normalized["providers"][1];
    assert_eq!(kubernetes["namespace"]["name"], json!("stack-prod"));
    assert_eq!(kubernetes["deploymentRegistry"]["insecure"], json!(false));
    assert_eq!(kubernetes["deploymentRegistry"]["namespace"], json!("stack"));
    assert_eq!(kubernetes["tlsCertificates"][0]["secretRef"]["namespace"], json!("default"));
    assert_eq!(kubernetes["resources"]["util"]["limits"]["cpu"], json!(256));

    assert_eq!(normalized["providers"][0]["setupIngressController"], json!("nginx"));
    assert_eq!(normalized["providers"][2]["version"], json!("1.4.6"));
    assert_eq!(normalized["providers"][2]["autoApply"], json!(true));
    assert_eq!(normalized["providers"][3]["testFailureThreshold"], json!("error"));
    assert_eq!(normalized["variables"], json!({"replicas": 2}));
}

#[test]
fn test_normalized_project_revalidates_unchanged() {
    let catalog = ProviderCatalog::with_builtins().unwrap();
    let first = validate_fixture(&catalog, "valid-stack");
    let second = catalog.validate_project(&first.normalized, ValidationOptions::default());

    assert!(second.violations.is_empty());
    assert_eq!(second.normalized, first.normalized);
}

#[test]
fn test_broken_stack_reports_everything_in_order() {
    let catalog = ProviderCatalog::with_builtins().unwrap();
    let result = validate_fixture(&catalog, "broken-stack");

    assert_eq!(
        paths(&result),
        vec![
            "name",
            "dotIgnoreFiles",
            "environments[1].name",
            "providers[0].buildMode",
            "providers[0].tlsCertificates[0].secretRef.name",
            "providers[1].testFailureThreshold",
            "providers[2].name",
            "providers[3].name",
        ]
    );
    assert_eq!(result.errors().count(), 7);
    assert_eq!(result.violations[1].severity, Severity::Warning);
    assert!(result.normalized.get("dotIgnoreFile").is_none());

    let report = render_text(&result.violations);
    assert!(report.ends_with("7 errors, 1 warning"));
    insta::assert_snapshot!(report.lines().nth(3).unwrap(), @r#"error: providers[0].buildMode: invalid value "docker", expected one of: "local-docker", "cluster-docker", "kaniko", "cluster-buildkit""#);
}

#[test]
fn test_broken_stack_violation_paths_resolve() {
    let catalog = ProviderCatalog::with_builtins().unwrap();
    let project = find_project(&fixture("broken-stack")).unwrap();
    let result = catalog.validate_project(&project.document, ValidationOptions::default());

    for violation in &result.violations {
        let resolved = match violation.path.segments() {
            // Provider entries are opaque to the project schema, so their
            // tail resolves against the schema the entry dispatched to.
            [PathSegment::Key(key), PathSegment::Index(idx), tail @ ..] if key == "providers" => {
                let name = project.document["providers"][*idx]["name"].as_str();
                match name.and_then(|name| catalog.get(name)) {
                    Some(schema) => schema.resolve(&FieldPath::from(tail.to_vec())).is_some(),
                    None => tail == [PathSegment::Key("name".to_string())],
                }
            }
            _ => catalog.project_schema().resolve(&violation.path).is_some(),
        };
        assert!(resolved, "{} does not resolve", violation.path);
    }
}

#[test]
fn test_legacy_project_is_lifted() {
    let catalog = ProviderCatalog::with_builtins().unwrap();
    let project = find_project(&fixture("legacy")).unwrap();

    assert_eq!(project.name, "legacy-app");
    assert_eq!(project.document["kind"], json!("Project"));

    let result = catalog.validate_project(&project.document, ValidationOptions::default());
    assert!(result.violations.is_empty(), "{}", render_text(&result.violations));
    assert_eq!(
        result.normalized["providers"][0]["dockerBuildExtraFlags"],
        json!(["--squash"])
    );
}

#[test]
fn test_custom_provider_schemas() {
    let mut catalog = ProviderCatalog::with_builtins().unwrap();

    let before = validate_fixture(&catalog, "custom-provider");
    assert_eq!(paths(&before), vec!["providers[0].name", "providers[1].name"]);

    let added = catalog
        .register_dir(&fixture("custom-provider/schemas"))
        .unwrap();
    assert_eq!(added, 1);

    let after = validate_fixture(&catalog, "custom-provider");
    assert_eq!(paths(&after), vec!["providers[1].initScript"]);
    assert_eq!(after.normalized["providers"][0]["shell"], json!("/bin/sh"));
}
