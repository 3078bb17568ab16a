//! Tests for the Introspect, ToValue and Typed derive macros.

#![allow(dead_code)]
#![allow(non_snake_case)]

use tysig::{
    Directives, FieldType, Introspect, Record, SchemaType, ShapeKind, ToValue, Typed, TypeRef,
    Value, describe, schema_for,
};

/// A question with context.
#[derive(Introspect, ToValue)]
struct Question {
    /// What the user asked.
    #[sig(required)]
    question: String,
    context: Vec<String>,
}

#[test]
fn test_simple_struct_shape() {
    let shape = Question::shape();
    assert_eq!(shape.name, "Question");
    assert_eq!(shape.type_ref, TypeRef::of::<Question>());

    let fields = shape.record_fields().unwrap();
    assert_eq!(fields.len(), 2);

    assert_eq!(fields[0].ident, "question");
    assert_eq!(fields[0].directives, Directives::default().required());
    assert_eq!(fields[0].doc.as_deref(), Some("What the user asked."));
    assert_eq!(fields[0].shape.kind, ShapeKind::String);

    assert_eq!(fields[1].ident, "context");
    assert!(fields[1].doc.is_none());
    assert!(matches!(fields[1].shape.kind, ShapeKind::Seq(_)));
}

#[test]
fn test_simple_struct_value() {
    let value = Question {
        question: "why?".to_string(),
        context: vec![],
    }
    .to_value();

    let expected = Record::new("Question")
        .with("question", "why?")
        .with("context", Value::List(vec![]));
    assert_eq!(value, Value::Record(expected));
}

#[derive(Typed)]
struct Answer {
    #[sig(field = "answer,required", desc = "The final answer", prefix = "Answer:")]
    Text: String,
    #[sig(field = ",required")]
    Confidence: i64,
    #[sig(skip)]
    scratch: Vec<u8>,
}

#[test]
fn test_directives_flow_into_metadata() {
    let meta = describe::<Question, Answer>();

    let answer = &meta.outputs[0];
    assert_eq!(answer.name, "answer");
    assert_eq!(answer.binding, "Text");
    assert!(answer.required);
    assert_eq!(answer.description, "The final answer");
    assert_eq!(answer.prefix, "Answer:");

    let confidence = &meta.outputs[1];
    assert_eq!(confidence.name, "confidence");
    assert!(confidence.required);
    assert_eq!(confidence.prefix, "confidence:");
    assert_eq!(confidence.field_type, FieldType::Int);

    assert_eq!(meta.outputs.len(), 2);
}

#[test]
fn test_skipped_field_is_not_in_value() {
    let value = Answer {
        Text: "42".to_string(),
        Confidence: 1,
        scratch: vec![1, 2, 3],
    }
    .to_value();
    let record = value.as_record().unwrap();
    assert!(record.get("scratch").is_none());
    assert_eq!(record.get("Text"), Some(&Value::from("42")));
}

#[derive(Typed)]
#[sig(rename_all = "camelCase")]
struct Profile {
    display_name: String,
    #[sig(name = "years")]
    age_years: u32,
    #[sig(optional)]
    home_page: Option<String>,
}

#[test]
fn test_rename_all_applies_to_unnamed_fields() {
    let schema = schema_for::<Profile>();
    assert_eq!(schema.property_ordering, ["displayName", "years", "homePage"]);
    assert_eq!(schema.required, ["displayName", "years"]);
    assert_eq!(
        schema.property("homePage").and_then(|p| p.schema_type),
        Some(SchemaType::String)
    );

    let meta = describe::<Profile, Profile>();
    assert_eq!(meta.inputs[0].name, "displayName");
    assert_eq!(meta.inputs[0].binding, "display_name");
}

/// Severity of an issue.
#[derive(Typed, Debug, Clone, Copy)]
enum Severity {
    Low,
    #[sig(name = "HIGH")]
    High,
    #[sig(skip)]
    Unknown,
}

#[test]
fn test_unit_enum() {
    assert_eq!(
        Severity::shape().kind,
        ShapeKind::Enum(vec!["Low".to_string(), "HIGH".to_string()])
    );
    assert_eq!(Severity::High.to_value(), Value::from("HIGH"));
    assert_eq!(Severity::Unknown.to_value(), Value::from("Unknown"));

    let schema = schema_for::<Severity>();
    assert_eq!(schema.enum_values, ["Low", "HIGH"]);
}

#[derive(Typed)]
#[sig(transparent)]
struct UserId(u64);

#[derive(Typed)]
struct Lookup {
    #[sig(required)]
    user: UserId,
}

#[test]
fn test_transparent_newtype() {
    assert_eq!(UserId::shape().kind, ShapeKind::Int);
    assert_eq!(UserId(7).to_value(), Value::UInt(7));

    let meta = describe::<Lookup, Lookup>();
    assert_eq!(meta.inputs[0].field_type, FieldType::Int);
}

#[derive(Typed)]
#[sig(name = "Citation")]
struct Source {
    url: String,
}

#[derive(Typed)]
struct Page<T> {
    items: Vec<T>,
    total: usize,
}

#[test]
fn test_generic_struct_and_item_naming() {
    let meta = describe::<Page<Source>, Page<Source>>();
    let items = &meta.inputs[0];
    assert_eq!(items.field_type, FieldType::Array);

    let item = items.item.as_deref().unwrap();
    assert_eq!(item.name, "citation");
    assert_eq!(item.description, "Citation");
    assert_eq!(item.field_type, FieldType::Object);
    assert!(item.property("url").is_some());

    let value = Page {
        items: vec![Source {
            url: "https://example.com".to_string(),
        }],
        total: 1,
    }
    .to_value();
    assert!(!value.is_zero());
}

#[derive(Typed)]
struct Marker;

#[test]
fn test_unit_struct_is_an_empty_record() {
    assert_eq!(Marker::shape().record_fields().map(<[_]>::len), Some(0));
    assert_eq!(Marker.to_value(), Value::Record(Record::new("Marker")));
}

#[derive(Typed)]
struct Raw {
    r#type: String,
}

#[test]
fn test_raw_identifiers() {
    let meta = describe::<Raw, Raw>();
    assert_eq!(meta.inputs[0].name, "type");
    assert_eq!(meta.inputs[0].binding, "type");

    let value = Raw {
        r#type: "a".to_string(),
    }
    .to_value();
    assert_eq!(value.as_record().and_then(|r| r.get("type")), Some(&Value::from("a")));
}
