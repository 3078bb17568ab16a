//! Schema document types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type tag of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

/// One node of a schema document, in the shape model-calling APIs accept
/// for structured output.
///
/// Unset fields are omitted when serialized. `properties` and `items` are
/// mutually exclusive, and every name in `required` is a key of
/// `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
}

impl SchemaNode {
    /// Node with only a type tag.
    #[must_use]
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder shorthands
    // =========================================================================

    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    /// Object with no properties yet.
    #[must_use]
    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::new(SchemaType::Array)
        }
    }

    /// Add a property, keeping `propertyOrdering` in step with insertion
    /// order.
    ///
    /// Adding a name twice replaces the earlier property in place, and the
    /// later `required` flag wins.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, node: SchemaNode, required: bool) -> Self {
        let name = name.into();
        if self.properties.insert(name.clone(), node).is_none() {
            self.property_ordering.push(name.clone());
        }
        match (required, self.required.iter().position(|listed| *listed == name)) {
            (true, None) => self.required.push(name),
            (false, Some(index)) => {
                self.required.remove(index);
            }
            _ => {}
        }
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON encoding.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON value encoding.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_property_replaces() {
        let node = SchemaNode::object()
            .with_property("x", SchemaNode::string(), true)
            .with_property("y", SchemaNode::boolean(), true)
            .with_property("x", SchemaNode::integer(), true);
        assert_eq!(node.property_ordering, ["x", "y"]);
        assert_eq!(node.required, ["x", "y"]);
        assert_eq!(node.properties.len(), 2);
        assert_eq!(
            node.property("x").and_then(|x| x.schema_type),
            Some(SchemaType::Integer)
        );

        let node = node.with_property("y", SchemaNode::boolean(), false);
        assert_eq!(node.required, ["x"]);
        assert_eq!(node.property_ordering, ["x", "y"]);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let json = SchemaNode::integer().to_json().unwrap();
        assert_eq!(json, r#"{"type":"INTEGER"}"#);
    }

    #[test]
    fn test_camel_case_keys() {
        let node = SchemaNode::object()
            .with_property("name", SchemaNode::string().with_description("Full name"), true)
            .with_property("tags", SchemaNode::array(SchemaNode::string()), false);
        let value = node.to_value().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "properties": {
                    "name": {"description": "Full name", "type": "STRING"},
                    "tags": {"items": {"type": "STRING"}, "type": "ARRAY"}
                },
                "propertyOrdering": ["name", "tags"],
                "required": ["name"],
                "type": "OBJECT"
            })
        );
    }

    #[test]
    fn test_enum_and_constraints() {
        let mut node = SchemaNode::string().with_enum(["low", "high"]);
        node.max_length = Some(4);
        let json = node.to_json().unwrap();
        assert_eq!(json, r#"{"enum":["low","high"],"maxLength":4,"type":"STRING"}"#);
    }
}
