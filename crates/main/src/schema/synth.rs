//! Schema synthesis from declared shapes.

use crate::shape::{FieldDecl, Introspect, Shape, ShapeKind};

use super::SchemaNode;

/// Synthesize the schema document for `T`.
///
/// ```rust
/// use tysig::{Introspect, SchemaType, schema_for};
///
/// #[derive(Introspect)]
/// struct Person {
///     name: String,
///     #[sig(optional)]
///     age: Option<i64>,
/// }
///
/// let schema = schema_for::<Person>();
/// assert_eq!(schema.schema_type, Some(SchemaType::Object));
/// assert_eq!(schema.required, ["name"]);
/// assert_eq!(schema.property_ordering, ["name", "age"]);
/// ```
#[must_use]
pub fn schema_for<T: Introspect>() -> SchemaNode {
    synthesize(&T::shape())
}

/// Synthesize the schema document for a shape.
///
/// Every level of indirection is stripped. Record properties are required
/// unless marked optional, and appear in declaration order.
#[must_use]
pub fn synthesize(shape: &Shape) -> SchemaNode {
    match &shape.unwrap_all().kind {
        ShapeKind::Record(fields) => record(fields),
        ShapeKind::Seq(item) if item.unwrap_all().kind == ShapeKind::Byte => {
            SchemaNode::string().with_format("byte")
        }
        ShapeKind::Seq(item) => SchemaNode::array(synthesize(item)),
        ShapeKind::Int | ShapeKind::Byte => SchemaNode::integer(),
        ShapeKind::Float => SchemaNode::number(),
        ShapeKind::Bool => SchemaNode::boolean(),
        ShapeKind::Map(_) => SchemaNode::object(),
        ShapeKind::Enum(variants) => SchemaNode::string().with_enum(variants.iter().cloned()),
        ShapeKind::String | ShapeKind::Text | ShapeKind::Indirect(_) => SchemaNode::string(),
    }
}

fn record(fields: &[FieldDecl]) -> SchemaNode {
    fields.iter().fold(SchemaNode::object(), |node, field| {
        let mut property = synthesize(&field.shape);
        let description = field
            .directives
            .description
            .as_ref()
            .or(field.doc.as_ref());
        if let Some(description) = description {
            property.description = Some(description.clone());
        }
        node.with_property(field.schema_name(), property, !field.directives.optional)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use crate::shape::Directives;

    fn item() -> Shape {
        Shape::record(
            "Item",
            vec![
                FieldDecl::new("id", Shape::int()),
                FieldDecl::new("label", Shape::string())
                    .with_directives(Directives::default().optional())
                    .with_doc("Display label"),
                FieldDecl::new("price", Shape::float())
                    .with_directives(Directives::default().named("unitPrice").describe("In cents")),
            ],
        )
    }

    #[test]
    fn test_leaves() {
        assert_eq!(synthesize(&Shape::string()), SchemaNode::string());
        assert_eq!(synthesize(&Shape::int()), SchemaNode::integer());
        assert_eq!(synthesize(&Shape::float()), SchemaNode::number());
        assert_eq!(synthesize(&Shape::bool()), SchemaNode::boolean());
        assert_eq!(synthesize(&Shape::text()), SchemaNode::string());
        assert_eq!(
            synthesize(&Shape::bytes()),
            SchemaNode::string().with_format("byte")
        );
    }

    #[test]
    fn test_wrappers_are_fully_unwrapped() {
        let shape = Shape::optional(Shape::optional(Shape::int()));
        assert_eq!(synthesize(&shape), SchemaNode::integer());
    }

    #[test]
    fn test_record_required_by_default() {
        let schema = synthesize(&item());
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert_eq!(schema.required, ["id", "unitPrice"]);
        assert_eq!(schema.property_ordering, ["id", "label", "unitPrice"]);

        let label = schema.property("label").unwrap();
        assert_eq!(label.description.as_deref(), Some("Display label"));

        let price = schema.property("unitPrice").unwrap();
        assert_eq!(price.schema_type, Some(SchemaType::Number));
        assert_eq!(price.description.as_deref(), Some("In cents"));
    }

    #[test]
    fn test_array_of_records() {
        let schema = synthesize(&Shape::list(item()));
        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        assert!(schema.properties.is_empty());

        let items = schema.items.as_deref().unwrap();
        assert_eq!(items.schema_type, Some(SchemaType::Object));
        assert!(items.is_required("id"));
        assert!(!items.is_required("label"));
    }

    #[test]
    fn test_map_and_enum() {
        let schema = synthesize(&Shape::map(Shape::int()));
        assert_eq!(schema, SchemaNode::object());

        let shape = Shape::anonymous(ShapeKind::Enum(vec!["Low".into(), "High".into()]));
        assert_eq!(synthesize(&shape).enum_values, ["Low", "High"]);
    }
}
