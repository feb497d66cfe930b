//! Parsing configuration documents from YAML, TOML and JSON
//!
//! All three formats are mapped onto the same [`ConfigDocument`] tree, so the
//! validator never sees source syntax.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use schema_core::ConfigDocument;

use crate::{Error, Result};

/// Source syntax of a document, detected from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// Detect the format from an extension:
    /// - `.yaml`, `.yml` -> YAML
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => write!(f, "YAML"),
            Format::Toml => write!(f, "TOML"),
            Format::Json => write!(f, "JSON"),
        }
    }
}

/// Parse a single document.
pub fn parse_document(source: &str, format: Format) -> Result<ConfigDocument> {
    let parsed = match format {
        Format::Yaml => serde_yaml::from_str::<YamlValue>(source)
            .map_err(|e| e.to_string())
            .and_then(|value| yaml_to_json(&value)),
        Format::Toml => toml::from_str::<toml::Table>(source)
            .map_err(|e| e.to_string())
            .and_then(toml_to_json),
        Format::Json => serde_json::from_str::<Value>(source).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| Error::Parse { format, message })
}

/// Parse every `---`-separated document in a YAML stream.
///
/// Empty documents (a stray `---` at the end of a file) are skipped.
pub fn parse_documents(source: &str) -> Result<Vec<ConfigDocument>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(source) {
        let value = YamlValue::deserialize(document).map_err(|e| Error::Parse {
            format: Format::Yaml,
            message: e.to_string(),
        })?;
        if value.is_null() {
            continue;
        }
        let converted = yaml_to_json(&value).map_err(|message| Error::Parse {
            format: Format::Yaml,
            message,
        })?;
        documents.push(converted);
    }
    Ok(documents)
}

/// Read and parse a document, detecting the format from the extension.
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let format = Format::from_path(path)?;
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_document(&source, format).map_err(|e| with_path(e, path))
}

/// Deserialize a typed value from a file, detecting the format.
pub(crate) fn load_typed<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let document = load_document(path)?;
    let format = Format::from_path(path)?;
    serde_json::from_value(document).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        format,
        message: e.to_string(),
    })
}

pub(crate) fn with_path(error: Error, path: &Path) -> Error {
    match error {
        Error::Parse { format, message } => Error::ConfigParse {
            path: path.to_path_buf(),
            format,
            message,
        },
        other => other,
    }
}

/// Convert YAML into the document tree.
///
/// Scalar mapping keys are stringified (`80: http` becomes `"80"`); tags are
/// dropped in favour of the tagged value. Key order is preserved as far as
/// the document map allows.
fn yaml_to_json(value: &YamlValue) -> std::result::Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("unsupported number {n}"))?
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    YamlValue::String(s) => s.clone(),
                    YamlValue::Bool(b) => b.to_string(),
                    YamlValue::Number(n) => n.to_string(),
                    _ => return Err("mapping keys must be scalars".to_string()),
                };
                map.insert(key, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

/// Convert TOML into the document tree. Datetimes become their RFC 3339
/// text.
fn toml_to_json(table: toml::Table) -> std::result::Result<Value, String> {
    let mut map = Map::new();
    for (key, value) in table {
        map.insert(key, toml_value_to_json(value)?);
    }
    Ok(Value::Object(map))
}

fn toml_value_to_json(value: toml::Value) -> std::result::Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("unsupported number {f}"))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_value_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        toml::Value::Table(table) => toml_to_json(table)?,
    })
}
