//! Built-in schema definitions
//!
//! The definitions live in `schemas/*.yml` and are embedded at compile time.
//! Each provider schema documents only the commonly used keys of its
//! provider; passthrough blocks are `opaque`.

use schema_core::{SchemaDefinition, SchemaNode};

use crate::document::{Format, parse_document};
use crate::{Error, Result};

/// Name of the project-level schema.
pub const PROJECT_SCHEMA: &str = "project";

/// Number of built-in provider schemas.
pub const BUILTIN_COUNT: usize = 6;

const PROJECT_SOURCE: &str = include_str!("../schemas/project.yml");

const PROVIDER_SOURCES: [(&str, &str); BUILTIN_COUNT] = [
    ("conftest", include_str!("../schemas/conftest.yml")),
    ("container", include_str!("../schemas/container.yml")),
    ("docker-compose", include_str!("../schemas/docker-compose.yml")),
    ("kubernetes", include_str!("../schemas/kubernetes.yml")),
    ("local-kubernetes", include_str!("../schemas/local-kubernetes.yml")),
    ("terraform", include_str!("../schemas/terraform.yml")),
];

/// The built-in project schema.
pub fn project_schema() -> Result<SchemaNode> {
    build(PROJECT_SCHEMA, PROJECT_SOURCE)
}

/// Every built-in provider schema, sorted by name.
pub fn builtin_providers() -> Result<Vec<(String, SchemaNode)>> {
    let mut providers = Vec::with_capacity(BUILTIN_COUNT);
    for (name, source) in PROVIDER_SOURCES {
        providers.push((name.to_string(), build(name, source)?));
    }
    Ok(providers)
}

/// Raw definition of a built-in schema, for callers that want to extend it.
pub fn builtin_definition(name: &str) -> Option<Result<SchemaDefinition>> {
    let source = if name == PROJECT_SCHEMA {
        PROJECT_SOURCE
    } else {
        PROVIDER_SOURCES
            .iter()
            .find(|(provider, _)| *provider == name)
            .map(|(_, source)| *source)?
    };
    Some(definition(source))
}

fn definition(source: &str) -> Result<SchemaDefinition> {
    let document = parse_document(source, Format::Yaml)?;
    serde_json::from_value(document).map_err(|e| Error::Parse {
        format: Format::Yaml,
        message: e.to_string(),
    })
}

fn build(name: &str, source: &str) -> Result<SchemaNode> {
    let mut definition = definition(source)?;
    if definition.name.is_empty() {
        definition.name = name.to_string();
    }
    Ok(SchemaNode::from_definition(definition)?)
}
