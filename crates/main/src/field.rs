//! Field descriptors produced by introspection.

use core::any::TypeId;
use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic classification of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form text; the fallback for anything unclassified.
    #[default]
    Text,
    String,
    Int,
    Bool,
    Array,
    Object,
    /// Binary payload (byte sequences).
    Image,
    Audio,
}

impl FieldType {
    /// The lowercase tag used when rendering signatures.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Image => "image",
            FieldType::Audio => "audio",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to the declared type behind a descriptor.
///
/// Descriptors converted from untyped signatures carry [`TypeRef::Unknown`].
#[derive(Debug, Clone, Copy, Default)]
pub enum TypeRef {
    Known {
        /// Fully-qualified type name, as reported by `core::any::type_name`.
        name: &'static str,
        id: TypeId,
    },
    #[default]
    Unknown,
}

impl TypeRef {
    /// Reference the type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeRef::Known {
            name: core::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<TypeId> {
        match self {
            TypeRef::Known { id, .. } => Some(*id),
            TypeRef::Unknown => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            TypeRef::Known { name, .. } => Some(name),
            TypeRef::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, TypeRef::Known { .. })
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TypeRef {}

/// Recursive description of one field.
///
/// Invariants: an [`FieldType::Array`] descriptor has `item` set and no
/// `properties`; an [`FieldType::Object`] descriptor has `properties` set
/// (possibly empty) and no `item`; every other type has neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// External name, unique among siblings.
    pub name: String,
    /// Name used to locate the value at runtime.
    pub binding: String,
    pub required: bool,
    pub description: String,
    /// Prefix used when rendering the field into a prompt.
    pub prefix: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Box<FieldDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, FieldDescriptor>>,
    #[serde(skip)]
    pub type_ref: TypeRef,
}

impl FieldDescriptor {
    /// Create an optional field with empty description and prefix.
    ///
    /// Passing [`FieldType::Array`] gives a text item; passing
    /// [`FieldType::Object`] gives empty properties. Use [`Self::array`] and
    /// [`Self::object`] to declare the nested shape.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let (item, properties) = match field_type {
            FieldType::Array => (Some(Box::new(Self::new("", FieldType::Text))), None),
            FieldType::Object => (None, Some(IndexMap::new())),
            _ => (None, None),
        };
        Self {
            binding: name.clone(),
            name,
            required: false,
            description: String::new(),
            prefix: String::new(),
            field_type,
            item,
            properties,
            type_ref: TypeRef::Unknown,
        }
    }

    /// Create an array field with the given item descriptor.
    pub fn array(name: impl Into<String>, item: FieldDescriptor) -> Self {
        let mut field = Self::new(name, FieldType::Text);
        field.field_type = FieldType::Array;
        field.item = Some(Box::new(item));
        field
    }

    /// Create an object field; properties are keyed by their names.
    pub fn object(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Self {
        let mut field = Self::new(name, FieldType::Object);
        field.properties = Some(
            properties
                .into_iter()
                .map(|prop| (prop.name.clone(), prop))
                .collect(),
        );
        field
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    #[must_use]
    pub fn with_type_ref(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = type_ref;
        self
    }

    /// Look up a nested property by external name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&FieldDescriptor> {
        self.properties.as_ref()?.get(name)
    }

    /// Nested properties in declaration order; empty for non-objects.
    pub fn flattened_properties(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.properties.iter().flat_map(IndexMap::values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Text.to_string(), "text");
        assert_eq!(FieldType::Image.to_string(), "image");
        assert_eq!(FieldType::default(), FieldType::Text);
    }

    #[test]
    fn test_new_keeps_nesting_invariants() {
        let array = FieldDescriptor::new("tags", FieldType::Array);
        assert!(array.item.is_some());
        assert!(array.properties.is_none());

        let object = FieldDescriptor::new("meta", FieldType::Object);
        assert!(object.item.is_none());
        assert_eq!(object.properties.as_ref().map(IndexMap::len), Some(0));

        let leaf = FieldDescriptor::new("n", FieldType::Int);
        assert!(leaf.item.is_none() && leaf.properties.is_none());
    }

    #[test]
    fn test_object_builder_preserves_order() {
        let field = FieldDescriptor::object(
            "address",
            [
                FieldDescriptor::new("street", FieldType::String).required(),
                FieldDescriptor::new("city", FieldType::String),
            ],
        );
        let names: Vec<_> = field.flattened_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["street", "city"]);
        assert!(field.property("street").is_some_and(|p| p.required));
    }

    #[test]
    fn test_type_ref_equality_by_identity() {
        assert_eq!(TypeRef::of::<String>(), TypeRef::of::<String>());
        assert_ne!(TypeRef::of::<String>(), TypeRef::of::<i32>());
        assert_eq!(TypeRef::Unknown, TypeRef::Unknown);
        assert_eq!(TypeRef::of::<bool>().name(), Some("bool"));
    }
}
