//! Untyped signatures and the bridge to typed metadata.
//!
//! [`LegacySignature`] is the hand-built (or shorthand-parsed) form used by
//! callers that have no declared types. [`SignatureMetadata::to_legacy`]
//! downgrades typed metadata, keeping only what the untyped form can hold;
//! [`SignatureMetadata::from_legacy`] upgrades it back with every field
//! optional.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    field::{FieldDescriptor, FieldType, TypeRef},
    signature::{FieldLike, Signature, SignatureMetadata, parse_shorthand, render},
};

/// A field of an untyped signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyField {
    pub name: String,
    pub prefix: String,
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl LegacyField {
    /// Text field with the default `<name>:` prefix.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            prefix: format!("{name}:"),
            name,
            description: String::new(),
            field_type: FieldType::Text,
        }
    }

    /// Bare text field: no prefix, no description.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
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
    pub fn without_prefix(mut self) -> Self {
        self.prefix.clear();
        self
    }

    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }
}

impl FieldLike for LegacyField {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn field_type(&self) -> FieldType {
        self.field_type
    }
}

impl From<&FieldDescriptor> for LegacyField {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            prefix: String::new(),
            description: field.description.clone(),
            field_type: field.field_type,
        }
    }
}

impl From<&LegacyField> for FieldDescriptor {
    fn from(field: &LegacyField) -> Self {
        FieldDescriptor::new(field.name.clone(), field.field_type)
            .with_description(field.description.clone())
            .with_prefix(field.prefix.clone())
            .with_type_ref(TypeRef::Unknown)
    }
}

/// An untyped signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySignature {
    pub inputs: Vec<LegacyField>,
    pub outputs: Vec<LegacyField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl LegacySignature {
    #[must_use]
    pub fn new(inputs: Vec<LegacyField>, outputs: Vec<LegacyField>) -> Self {
        Self {
            inputs,
            outputs,
            instruction: None,
        }
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Add an input at the end.
    #[must_use]
    pub fn append_input(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.inputs.push(
            LegacyField::named(name)
                .with_prefix(prefix)
                .with_description(description),
        );
        self
    }

    /// Add an output at the front.
    #[must_use]
    pub fn prepend_output(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.outputs.insert(
            0,
            LegacyField::named(name)
                .with_prefix(prefix)
                .with_description(description),
        );
        self
    }
}

impl Signature for LegacySignature {
    type Field = LegacyField;

    fn inputs(&self) -> &[LegacyField] {
        &self.inputs
    }

    fn outputs(&self) -> &[LegacyField] {
        &self.outputs
    }

    fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }
}

impl fmt::Display for LegacySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl FromStr for LegacySignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_shorthand(s)
    }
}

impl SignatureMetadata {
    /// Downgrade to an untyped signature.
    ///
    /// Keeps name, description and type of every field, plus the
    /// instruction. Required flags, nested shapes and prefixes are dropped.
    #[must_use]
    pub fn to_legacy(&self) -> LegacySignature {
        LegacySignature {
            inputs: self.inputs.iter().map(LegacyField::from).collect(),
            outputs: self.outputs.iter().map(LegacyField::from).collect(),
            instruction: self.instruction.clone(),
        }
    }

    /// Upgrade an untyped signature. Every field is optional, bound by its
    /// name, and has no known declared type.
    #[must_use]
    pub fn from_legacy(sig: &LegacySignature) -> Self {
        Self {
            inputs: sig.inputs.iter().map(FieldDescriptor::from).collect(),
            outputs: sig.outputs.iter().map(FieldDescriptor::from).collect(),
            instruction: sig.instruction.clone(),
        }
    }

    /// Parse shorthand notation straight into typed metadata.
    pub fn from_shorthand(text: &str) -> crate::Result<Self> {
        parse_shorthand(text).map(|sig| Self::from_legacy(&sig))
    }
}

impl From<&LegacySignature> for SignatureMetadata {
    fn from(sig: &LegacySignature) -> Self {
        Self::from_legacy(sig)
    }
}

impl From<&SignatureMetadata> for LegacySignature {
    fn from(meta: &SignatureMetadata) -> Self {
        meta.to_legacy()
    }
}
