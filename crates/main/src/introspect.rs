//! Field metadata extraction from declared shapes.
//!
//! The introspector walks a [`Shape`] and produces one [`FieldDescriptor`]
//! per declared field, recursing into nested records and array elements.
//! Introspection is total: anything it cannot classify becomes
//! [`FieldType::Text`].

use indexmap::IndexMap;

use crate::{
    field::{FieldDescriptor, FieldType},
    shape::{FieldDecl, Introspect, Shape, ShapeKind},
    signature::SignatureMetadata,
};

/// Which side of a signature a field belongs to.
///
/// Only the default prefix depends on it: inputs get none, outputs get
/// `<name>:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Input,
    Output,
}

/// Introspect an input/output type pair into signature metadata.
///
/// ```rust
/// use tysig::{Introspect, describe};
///
/// #[derive(Introspect)]
/// struct Question {
///     #[sig(required)]
///     question: String,
/// }
///
/// #[derive(Introspect)]
/// struct Answer {
///     answer: String,
///     confidence: i32,
/// }
///
/// let meta = describe::<Question, Answer>();
/// assert_eq!(meta.inputs[0].name, "question");
/// assert_eq!(meta.outputs[1].prefix, "confidence:");
/// ```
#[must_use]
pub fn describe<I: Introspect, O: Introspect>() -> SignatureMetadata {
    SignatureMetadata::new(
        describe_fields(&I::shape(), Role::Input),
        describe_fields(&O::shape(), Role::Output),
    )
}

/// Describe every field of a record shape, in declaration order.
///
/// One level of indirection is stripped first; a shape that is not a record
/// has no fields.
#[must_use]
pub fn describe_fields(shape: &Shape, role: Role) -> Vec<FieldDescriptor> {
    shape
        .unwrap_once()
        .record_fields()
        .map(|fields| fields.iter().map(|decl| describe_field(decl, role)).collect())
        .unwrap_or_default()
}

/// Describe a single declared field.
#[must_use]
pub fn describe_field(decl: &FieldDecl, role: Role) -> FieldDescriptor {
    let directives = &decl.directives;
    let name = directives
        .name
        .clone()
        .unwrap_or_else(|| decl.ident.to_lowercase());
    let prefix = match (&directives.prefix, role) {
        (Some(prefix), _) => prefix.clone(),
        (None, Role::Input) => String::new(),
        (None, Role::Output) => format!("{name}:"),
    };
    let description = directives
        .description
        .clone()
        .unwrap_or_else(|| decl.ident.clone());

    let field_type = classify(&decl.shape);
    let mut field = FieldDescriptor::new(name, field_type)
        .with_binding(decl.ident.clone())
        .with_description(description)
        .with_prefix(prefix)
        .with_type_ref(decl.shape.type_ref);
    field.required = directives.required;

    match field_type {
        FieldType::Object => field.properties = Some(describe_properties(&decl.shape)),
        FieldType::Array => field.item = describe_item(&decl.shape).map(Box::new),
        _ => {}
    }
    field
}

/// Semantic type of a shape after stripping exactly one level of
/// indirection. A second level classifies as [`FieldType::Text`].
#[must_use]
pub fn classify(shape: &Shape) -> FieldType {
    match &shape.unwrap_once().kind {
        ShapeKind::String => FieldType::String,
        ShapeKind::Bool => FieldType::Bool,
        ShapeKind::Int => FieldType::Int,
        ShapeKind::Seq(item) if item.kind == ShapeKind::Byte => FieldType::Image,
        ShapeKind::Seq(_) => FieldType::Array,
        ShapeKind::Map(_) | ShapeKind::Record(_) => FieldType::Object,
        ShapeKind::Text
        | ShapeKind::Byte
        | ShapeKind::Float
        | ShapeKind::Enum(_)
        | ShapeKind::Indirect(_) => FieldType::Text,
    }
}

/// Nested properties keyed by external name. Maps have none.
fn describe_properties(shape: &Shape) -> IndexMap<String, FieldDescriptor> {
    describe_fields(shape, Role::Input)
        .into_iter()
        .map(|field| (field.name.clone(), field))
        .collect()
}

/// The element of a sequence, described as a synthetic field named after
/// the element type.
fn describe_item(shape: &Shape) -> Option<FieldDescriptor> {
    match &shape.unwrap_once().kind {
        ShapeKind::Seq(element) => {
            let decl = FieldDecl::new(element.name, (**element).clone());
            Some(describe_field(&decl, Role::Input))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Directives;

    fn address() -> Shape {
        Shape::record(
            "Address",
            vec![
                FieldDecl::new("Street", Shape::string())
                    .with_directives(Directives::default().required()),
                FieldDecl::new("City", Shape::string()),
            ],
        )
    }

    #[test]
    fn test_defaults_by_role() {
        let decl = FieldDecl::new("Answer", Shape::string());

        let input = describe_field(&decl, Role::Input);
        assert_eq!(input.name, "answer");
        assert_eq!(input.binding, "Answer");
        assert_eq!(input.description, "Answer");
        assert_eq!(input.prefix, "");
        assert!(!input.required);

        let output = describe_field(&decl, Role::Output);
        assert_eq!(output.prefix, "answer:");
    }

    #[test]
    fn test_overrides() {
        let decl = FieldDecl::new("q", Shape::string()).with_directives(
            Directives::from_tag("query,required")
                .describe("The user question")
                .with_prefix("Q>"),
        );
        let field = describe_field(&decl, Role::Output);
        assert_eq!(field.name, "query");
        assert_eq!(field.binding, "q");
        assert!(field.required);
        assert_eq!(field.description, "The user question");
        assert_eq!(field.prefix, "Q>");
    }

    #[test]
    fn test_output_prefix_follows_override_name() {
        let decl = FieldDecl::new("q", Shape::string())
            .with_directives(Directives::default().named("query"));
        assert_eq!(describe_field(&decl, Role::Output).prefix, "query:");
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify(&Shape::string()), FieldType::String);
        assert_eq!(classify(&Shape::int()), FieldType::Int);
        assert_eq!(classify(&Shape::bool()), FieldType::Bool);
        assert_eq!(classify(&Shape::float()), FieldType::Text);
        assert_eq!(classify(&Shape::bytes()), FieldType::Image);
        assert_eq!(classify(&Shape::list(Shape::int())), FieldType::Array);
        assert_eq!(classify(&Shape::map(Shape::int())), FieldType::Object);
        assert_eq!(classify(&address()), FieldType::Object);
        assert_eq!(
            classify(&Shape::anonymous(ShapeKind::Enum(vec!["A".into()]))),
            FieldType::Text
        );
    }

    #[test]
    fn test_one_level_of_indirection() {
        assert_eq!(classify(&Shape::optional(Shape::int())), FieldType::Int);
        assert_eq!(
            classify(&Shape::optional(Shape::optional(Shape::int()))),
            FieldType::Text
        );
    }

    #[test]
    fn test_nested_record_properties_use_input_role() {
        let decl = FieldDecl::new("Home", address());
        let field = describe_field(&decl, Role::Output);
        assert_eq!(field.field_type, FieldType::Object);
        assert!(field.item.is_none());

        let street = field.property("street").expect("street property");
        assert!(street.required);
        assert_eq!(street.prefix, "");
        assert_eq!(street.binding, "Street");
    }

    #[test]
    fn test_map_has_empty_properties() {
        let field = describe_field(&FieldDecl::new("meta", Shape::map(Shape::int())), Role::Input);
        assert_eq!(field.properties.as_ref().map(IndexMap::len), Some(0));
    }

    #[test]
    fn test_array_item_is_named_after_element_type() {
        let decl = FieldDecl::new("Addresses", Shape::list(address()));
        let field = describe_field(&decl, Role::Input);
        assert_eq!(field.field_type, FieldType::Array);
        assert!(field.properties.is_none());

        let item = field.item.as_deref().expect("array item");
        assert_eq!(item.name, "address");
        assert_eq!(item.description, "Address");
        assert_eq!(item.field_type, FieldType::Object);
        assert_eq!(item.flattened_properties().count(), 2);
    }

    #[test]
    fn test_non_record_has_no_fields() {
        assert!(describe_fields(&Shape::string(), Role::Input).is_empty());
        assert_eq!(describe_fields(&Shape::optional(address()), Role::Input).len(), 2);
    }
}
