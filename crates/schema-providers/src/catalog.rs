//! Provider catalog
//!
//! An explicit, immutable-once-built map from provider name to schema.
//! Callers own the catalog and pass it to whatever needs it.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use schema_core::{
    ConfigDocument, FieldPath, SchemaNode, ValidationOptions, ValidationResult, Validator,
    Violation, ViolationKind, value_kind,
};

use crate::builtins;
use crate::loader::SchemaLoader;
use crate::{Error, Result};

/// Project schema plus every registered provider schema.
///
/// # Example
///
/// ```
/// use schema_providers::ProviderCatalog;
/// use serde_json::json;
///
/// let catalog = ProviderCatalog::with_builtins().unwrap();
/// let result = catalog.validate_project(
///     &json!({"kind": "Project", "name": "demo", "providers": [{"name": "kubernetes"}]}),
///     Default::default(),
/// );
/// assert_eq!(result.violations[0].path.to_string(), "providers[0].context");
/// ```
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    project: SchemaNode,
    providers: BTreeMap<String, SchemaNode>,
}

impl ProviderCatalog {
    /// Catalog with the built-in project schema and no providers.
    pub fn new() -> Result<Self> {
        Ok(Self {
            project: builtins::project_schema()?,
            providers: BTreeMap::new(),
        })
    }

    /// Catalog with every built-in provider registered.
    pub fn with_builtins() -> Result<Self> {
        let mut catalog = Self::new()?;
        for (name, schema) in builtins::builtin_providers()? {
            catalog.register(name, schema)?;
        }
        Ok(catalog)
    }

    /// Register a provider schema under `name`.
    ///
    /// Names are unique; registering one twice is an error.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaNode) -> Result<()> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(Error::DuplicateProvider { name });
        }
        tracing::debug!(provider = %name, "registered provider schema");
        self.providers.insert(name, schema);
        Ok(())
    }

    /// Register every schema definition file in `dir`.
    ///
    /// Returns how many providers were added.
    pub fn register_dir(&mut self, dir: &Path) -> Result<usize> {
        let schemas = SchemaLoader::new().load_dir(dir)?;
        let count = schemas.len();
        for (name, schema) in schemas {
            self.register(name, schema)?;
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.providers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn project_schema(&self) -> &SchemaNode {
        &self.project
    }

    /// Validate a single provider entry against the schema registered as `name`.
    pub fn validate_provider(
        &self,
        name: &str,
        document: &ConfigDocument,
        options: ValidationOptions,
    ) -> Result<ValidationResult> {
        let schema = self.get(name).ok_or_else(|| Error::UnknownProvider {
            name: name.to_string(),
        })?;
        Ok(Validator::new(schema).with_options(options).validate(document))
    }

    /// Validate a whole project document.
    ///
    /// The project-level violations come first, then those of each
    /// `providers[i]` entry in order, addressed from the document root. Each
    /// entry of `providers` in the normalized document is replaced by its
    /// own normalized form.
    pub fn validate_project(
        &self,
        document: &ConfigDocument,
        options: ValidationOptions,
    ) -> ValidationResult {
        let mut result = Validator::new(&self.project)
            .with_options(options)
            .validate(document);

        let Some(Value::Array(entries)) = document.get("providers") else {
            return result;
        };

        let base = FieldPath::root().key("providers");
        let mut normalized_entries = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let entry_path = base.index(idx);
            match self.dispatch(entry, &entry_path) {
                Ok(schema) => {
                    let entry_result = Validator::new(schema).with_options(options).validate(entry);
                    result.violations.extend(
                        entry_result
                            .violations
                            .into_iter()
                            .map(|violation| violation.rebase(&entry_path)),
                    );
                    normalized_entries.push(entry_result.normalized);
                }
                Err(violation) => {
                    result.violations.push(violation);
                    normalized_entries.push(entry.clone());
                }
            }
        }

        if let Some(slot) = result.normalized.get_mut("providers") {
            *slot = Value::Array(normalized_entries);
        }
        result
    }

    /// Pick the schema for one `providers[i]` entry by its `name`.
    fn dispatch(
        &self,
        entry: &Value,
        entry_path: &FieldPath,
    ) -> std::result::Result<&SchemaNode, Violation> {
        let name_path = entry_path.key("name");
        let Value::Object(entry) = entry else {
            return Err(mismatch(entry_path, "object", entry));
        };

        match entry.get("name") {
            None => Err(Violation::new(
                name_path,
                ViolationKind::MissingRequiredField,
                "required field is missing",
            )),
            Some(Value::String(name)) => self.get(name).ok_or_else(|| {
                let allowed: Vec<Value> = self.names().map(Value::from).collect();
                let listed = allowed
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Violation::new(
                    name_path,
                    ViolationKind::InvalidEnumValue { allowed },
                    format!("unknown provider \"{name}\", expected one of: {listed}"),
                )
            }),
            Some(other) => Err(mismatch(&name_path, "string", other)),
        }
    }
}

fn mismatch(path: &FieldPath, expected: &str, value: &Value) -> Violation {
    let found = value_kind(value).to_string();
    let message = format!("expected {expected}, found {found}");
    Violation::new(
        path.clone(),
        ViolationKind::TypeMismatch {
            expected: expected.to_string(),
            found,
        },
        message,
    )
}
