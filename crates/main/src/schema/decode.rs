//! Decoding of pre-authored schema documents.

use tracing::debug;

use super::SchemaNode;
use crate::error::{Result, SchemaDecodeError};

impl SchemaNode {
    /// Decode a schema document from JSON text.
    ///
    /// ```rust
    /// use tysig::SchemaNode;
    ///
    /// let schema = SchemaNode::from_json(
    ///     r#"{"type": "OBJECT", "properties": {"name": {"type": "STRING"}}, "required": ["name"]}"#,
    /// )
    /// .unwrap();
    /// assert!(schema.is_required("name"));
    ///
    /// assert!(SchemaNode::from_json(r#"{"type": "OBJECT", "required": ["name"]}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        finish(serde_json::from_str(json))
    }

    /// Decode a schema document from JSON bytes.
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        finish(serde_json::from_slice(json))
    }

    /// Decode a schema document from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        finish(serde_json::from_value(value))
    }

    /// Check the structural rules that serde cannot express: `items` and
    /// `properties` are exclusive, and `required` only names properties.
    pub fn check_structure(&self) -> core::result::Result<(), SchemaDecodeError> {
        check(self, "$")
    }
}

fn finish(decoded: serde_json::Result<SchemaNode>) -> Result<SchemaNode> {
    let node = decoded.map_err(|err| {
        debug!(%err, "schema document is not valid JSON for a schema");
        SchemaDecodeError::Json(err)
    })?;
    node.check_structure()
        .inspect_err(|err| debug!(%err, "schema document violates a structural rule"))?;
    Ok(node)
}

fn check(node: &SchemaNode, path: &str) -> core::result::Result<(), SchemaDecodeError> {
    if node.items.is_some() && !node.properties.is_empty() {
        return Err(structure(path, "`items` and `properties` are both set"));
    }
    if let Some(missing) = node
        .required
        .iter()
        .find(|name| !node.properties.contains_key(name.as_str()))
    {
        return Err(structure(
            path,
            format!("`required` names unknown property `{missing}`"),
        ));
    }

    for (name, property) in &node.properties {
        check(property, &format!("{path}.properties.{name}"))?;
    }
    if let Some(items) = &node.items {
        check(items, &format!("{path}.items"))?;
    }
    for (index, alternative) in node.any_of.iter().enumerate() {
        check(alternative, &format!("{path}.anyOf[{index}]"))?;
    }
    Ok(())
}

fn structure(path: &str, message: impl Into<String>) -> SchemaDecodeError {
    SchemaDecodeError::Structure {
        path: path.to_string(),
        message: message.into(),
    }
}
