//! Declared data shapes.
//!
//! A [`Shape`] is the static description of a type that the introspector
//! and the schema synthesizer both read. Shapes come from two places:
//!
//! - `#[derive(Introspect)]`, which emits a shape table for a struct or a
//!   unit-only enum,
//! - the builder API, for callers declaring a shape programmatically.
//!
//! # Example
//!
//! ```rust
//! use tysig::{Directives, FieldDecl, Shape};
//!
//! let shape = Shape::record(
//!     "Answer",
//!     vec![
//!         FieldDecl::new("text", Shape::string()).with_directives(Directives::default().required()),
//!         FieldDecl::new("sources", Shape::list(Shape::string())),
//!     ],
//! );
//! assert_eq!(shape.record_fields().map(<[_]>::len), Some(2));
//! ```

mod traits;

pub use traits::Introspect;

use crate::field::TypeRef;

/// Static description of a declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Short type name (`String`, `Address`); empty for anonymous
    /// containers such as `Vec<T>` or `Option<T>`.
    pub name: &'static str,
    pub type_ref: TypeRef,
}

/// Structural kind of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Anything without a more specific classification.
    Text,
    String,
    Int,
    /// A single byte; sequences of bytes are binary payloads.
    Byte,
    Float,
    Bool,
    /// Unit-only enum, listing its variant names.
    Enum(Vec<String>),
    Seq(Box<Shape>),
    /// Key/value mapping; only the value shape is kept.
    Map(Box<Shape>),
    Record(Vec<FieldDecl>),
    /// Optional or pointer indirection (`Option`, `Box`, `Rc`, `Arc`).
    Indirect(Box<Shape>),
}

impl Shape {
    /// Shape of the type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>(name: &'static str, kind: ShapeKind) -> Self {
        Self {
            kind,
            name,
            type_ref: TypeRef::of::<T>(),
        }
    }

    /// Shape with no backing Rust type.
    #[must_use]
    pub fn anonymous(kind: ShapeKind) -> Self {
        Self {
            kind,
            name: "",
            type_ref: TypeRef::Unknown,
        }
    }

    // =========================================================================
    // Builder shorthands
    // =========================================================================

    #[must_use]
    pub fn text() -> Self {
        Self::anonymous(ShapeKind::Text)
    }

    #[must_use]
    pub fn string() -> Self {
        Self::anonymous(ShapeKind::String)
    }

    #[must_use]
    pub fn int() -> Self {
        Self::anonymous(ShapeKind::Int)
    }

    #[must_use]
    pub fn float() -> Self {
        Self::anonymous(ShapeKind::Float)
    }

    #[must_use]
    pub fn bool() -> Self {
        Self::anonymous(ShapeKind::Bool)
    }

    #[must_use]
    pub fn bytes() -> Self {
        Self::list(Self::anonymous(ShapeKind::Byte))
    }

    #[must_use]
    pub fn list(item: Shape) -> Self {
        Self::anonymous(ShapeKind::Seq(Box::new(item)))
    }

    #[must_use]
    pub fn map(value: Shape) -> Self {
        Self::anonymous(ShapeKind::Map(Box::new(value)))
    }

    #[must_use]
    pub fn optional(inner: Shape) -> Self {
        Self::anonymous(ShapeKind::Indirect(Box::new(inner)))
    }

    #[must_use]
    pub fn record(name: &'static str, fields: Vec<FieldDecl>) -> Self {
        Self {
            kind: ShapeKind::Record(fields),
            name,
            type_ref: TypeRef::Unknown,
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Strip exactly one level of indirection.
    #[must_use]
    pub fn unwrap_once(&self) -> &Shape {
        match &self.kind {
            ShapeKind::Indirect(inner) => inner,
            _ => self,
        }
    }

    /// Strip every level of indirection.
    #[must_use]
    pub fn unwrap_all(&self) -> &Shape {
        let mut shape = self;
        while let ShapeKind::Indirect(inner) = &shape.kind {
            shape = inner;
        }
        shape
    }

    /// Record fields, if this shape is a record.
    #[must_use]
    pub fn record_fields(&self) -> Option<&[FieldDecl]> {
        match &self.kind {
            ShapeKind::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

/// One declared field of a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field identifier as declared; also the runtime binding name.
    pub ident: String,
    pub directives: Directives,
    /// Doc comment attached to the field.
    pub doc: Option<String>,
    pub shape: Shape,
}

impl FieldDecl {
    pub fn new(ident: impl Into<String>, shape: Shape) -> Self {
        Self {
            ident: ident.into(),
            directives: Directives::default(),
            doc: None,
            shape,
        }
    }

    #[must_use]
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Property name used in schema documents: the name override, else the
    /// identifier verbatim.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        self.directives.name.as_deref().unwrap_or(&self.ident)
    }
}

/// Per-field overrides, as written in `#[sig(...)]`.
///
/// `required` drives the introspector (fields are optional unless marked);
/// `optional` drives the schema synthesizer (properties are required unless
/// marked). The two are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub name: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub prefix: Option<String>,
    pub optional: bool,
}

impl Directives {
    /// Parse a compact `"<name>[,required]"` tag.
    ///
    /// An empty name part keeps the default name; unknown options are ignored.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::default().with_tag(tag)
    }

    /// Apply a compact `"<name>[,required]"` tag on top of these directives.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        let mut parts = tag.split(',');
        if let Some(name) = parts.next().filter(|name| !name.is_empty()) {
            self.name = Some(name.to_string());
        }
        if parts.any(|part| part.trim() == "required") {
            self.required = true;
        }
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_and_required() {
        let d = Directives::from_tag("answer,required");
        assert_eq!(d.name.as_deref(), Some("answer"));
        assert!(d.required);
    }

    #[test]
    fn test_tag_empty_name_keeps_default() {
        let d = Directives::from_tag(",required");
        assert_eq!(d.name, None);
        assert!(d.required);

        let d = Directives::from_tag("answer, required ");
        assert!(d.required);

        let d = Directives::from_tag("answer,omitempty");
        assert!(!d.required);
    }

    #[test]
    fn test_unwrap_once_vs_all() {
        let nested = Shape::optional(Shape::optional(Shape::string()));
        assert!(matches!(nested.unwrap_once().kind, ShapeKind::Indirect(_)));
        assert_eq!(nested.unwrap_all().kind, ShapeKind::String);
        assert_eq!(Shape::int().unwrap_once().kind, ShapeKind::Int);
    }

    #[test]
    fn test_schema_name_prefers_override() {
        let field = FieldDecl::new("user_name", Shape::string());
        assert_eq!(field.schema_name(), "user_name");

        let field = field.with_directives(Directives::default().named("userName"));
        assert_eq!(field.schema_name(), "userName");
    }
}
