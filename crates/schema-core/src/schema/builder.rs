//! Fluent construction of schema trees in code

use serde_json::Value;

use super::{SchemaDefinition, SchemaKind, SchemaNode};
use crate::Result;

/// Builder producing a [`SchemaDefinition`], checked on [`FieldBuilder::build`].
///
/// Nothing is validated until `build`, so builders can be assembled in any
/// order and nested freely.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    definition: SchemaDefinition,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            definition: SchemaDefinition {
                name: name.into(),
                kind,
                ..SchemaDefinition::default()
            },
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Boolean)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Object)
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Opaque)
    }

    /// Array whose elements are checked against `element`.
    pub fn array(name: impl Into<String>, element: FieldBuilder) -> Self {
        Self::new(name, SchemaKind::Array).child(element)
    }

    pub fn union(name: impl Into<String>, variants: impl IntoIterator<Item = FieldBuilder>) -> Self {
        let mut builder = Self::new(name, SchemaKind::Union);
        builder.definition.variants = variants.into_iter().map(|v| v.definition).collect();
        builder
    }

    pub fn required(mut self) -> Self {
        self.definition.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.definition.default = Some(value.into());
        self
    }

    pub fn allowed_values<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.definition.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.definition.pattern = Some(pattern.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.definition.deprecated = Some(message.into());
        self
    }

    pub fn replaced_by(mut self, sibling: impl Into<String>) -> Self {
        self.definition.replaced_by = Some(sibling.into());
        self
    }

    pub fn child(mut self, child: FieldBuilder) -> Self {
        self.definition.children.push(child.definition);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = FieldBuilder>) -> Self {
        self.definition
            .children
            .extend(children.into_iter().map(|c| c.definition));
        self
    }

    pub fn into_definition(self) -> SchemaDefinition {
        self.definition
    }

    pub fn build(self) -> Result<SchemaNode> {
        SchemaNode::from_definition(self.definition)
    }
}

impl From<FieldBuilder> for SchemaDefinition {
    fn from(builder: FieldBuilder) -> Self {
        builder.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_matches_definition() {
        let built = FieldBuilder::object("conftest")
            .child(
                FieldBuilder::string("testFailureThreshold")
                    .default_value("error")
                    .allowed_values(["error", "warn", "none"]),
            )
            .into_definition();

        let parsed: SchemaDefinition = serde_json::from_value(json!({
            "name": "conftest",
            "type": "object",
            "children": [{
                "name": "testFailureThreshold",
                "type": "string",
                "default": "error",
                "allowedValues": ["error", "warn", "none"]
            }]
        }))
        .unwrap();

        assert_eq!(built, parsed);
    }

    #[test]
    fn test_two_array_children_fail_on_build() {
        let result = FieldBuilder::array("volumes", FieldBuilder::string("a"))
            .child(FieldBuilder::string("b"))
            .build();
        assert!(result.is_err());
    }
}
