//! Schema synthesis and decoding tests.

#![cfg(feature = "derive")]
#![allow(dead_code)]

use std::collections::HashMap;

use tysig::{Introspect, SchemaNode, SchemaType, schema_for};

#[derive(Introspect)]
struct LineItem {
    /// Stock keeping unit.
    sku: String,
    quantity: i32,
    #[sig(optional)]
    discount: Option<f64>,
}

#[derive(Introspect)]
struct Invoice {
    items: Vec<LineItem>,
    #[sig(name = "meta")]
    metadata: HashMap<String, String>,
    signature: Vec<u8>,
    paid: bool,
}

#[test]
fn test_array_of_records() {
    let schema = schema_for::<Vec<LineItem>>();
    assert_eq!(schema.schema_type, Some(SchemaType::Array));

    let item = schema.items.as_deref().unwrap();
    assert_eq!(item.schema_type, Some(SchemaType::Object));
    assert_eq!(item.required, ["sku", "quantity"]);
    assert_eq!(item.property_ordering, ["sku", "quantity", "discount"]);
    assert_eq!(
        item.property("sku").and_then(|s| s.description.as_deref()),
        Some("Stock keeping unit.")
    );
    assert_eq!(
        item.property("discount").and_then(|d| d.schema_type),
        Some(SchemaType::Number)
    );
}

#[test]
fn test_nested_record_document() {
    let schema = schema_for::<Invoice>();
    let json = schema.to_value().unwrap();

    assert_eq!(json["type"], "OBJECT");
    assert_eq!(json["properties"]["items"]["type"], "ARRAY");
    assert_eq!(json["properties"]["items"]["items"]["type"], "OBJECT");
    assert_eq!(json["properties"]["meta"], serde_json::json!({"type": "OBJECT"}));
    assert_eq!(
        json["properties"]["signature"],
        serde_json::json!({"format": "byte", "type": "STRING"})
    );
    assert_eq!(json["properties"]["paid"]["type"], "BOOLEAN");
    assert_eq!(
        json["required"],
        serde_json::json!(["items", "meta", "signature", "paid"])
    );
}

#[test]
fn test_synthesized_documents_decode() {
    let schema = schema_for::<Invoice>();
    let json = schema.to_json().unwrap();
    let decoded = SchemaNode::from_json(&json).unwrap();
    assert_eq!(decoded, schema);
}

#[test]
fn test_handwritten_document_is_checked() {
    let err = SchemaNode::from_json(
        r#"{"type": "OBJECT", "properties": {"a": {"type": "STRING"}}, "required": ["a", "b"]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown property `b`"));
}
