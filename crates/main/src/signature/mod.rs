//! Signature metadata and rendering.
//!
//! Two representations share one rendering:
//! - [`SignatureMetadata`], the typed form built by introspection,
//! - [`LegacySignature`](crate::legacy::LegacySignature), the untyped form
//!   built by hand or parsed from shorthand.
//!
//! Both implement [`Signature`], whose [`render`] output looks like:
//!
//! ```text
//! Inputs:
//!   - question (question)
//! Outputs:
//!   - confidence [int] (confidence)
//! Instruction: Answer briefly.
//! ```

mod shorthand;

use core::fmt;

use serde::Serialize;

pub use shorthand::parse_shorthand;

use crate::field::{FieldDescriptor, FieldType};

/// Ordered inputs and outputs of a typed signature, plus an optional
/// instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignatureMetadata {
    pub inputs: Vec<FieldDescriptor>,
    pub outputs: Vec<FieldDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl SignatureMetadata {
    #[must_use]
    pub fn new(inputs: Vec<FieldDescriptor>, outputs: Vec<FieldDescriptor>) -> Self {
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

    /// Add an optional text input at the end.
    #[must_use]
    pub fn append_input(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.inputs.push(text_field(name, prefix, description));
        self
    }

    /// Add an optional text output at the front.
    #[must_use]
    pub fn prepend_output(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.outputs.insert(0, text_field(name, prefix, description));
        self
    }

    /// Look up an input by external name.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inputs.iter().find(|field| field.name == name)
    }

    /// Look up an output by external name.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&FieldDescriptor> {
        self.outputs.iter().find(|field| field.name == name)
    }
}

fn text_field(
    name: impl Into<String>,
    prefix: impl Into<String>,
    description: impl Into<String>,
) -> FieldDescriptor {
    FieldDescriptor::new(name, FieldType::Text)
        .with_prefix(prefix)
        .with_description(description)
}

/// Read access to a signature field, shared by both representations.
pub trait FieldLike {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn prefix(&self) -> &str;
    fn field_type(&self) -> FieldType;
}

impl FieldLike for FieldDescriptor {
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

/// Read access to a signature, shared by both representations.
pub trait Signature {
    type Field: FieldLike;

    fn inputs(&self) -> &[Self::Field];

    fn outputs(&self) -> &[Self::Field];

    fn instruction(&self) -> Option<&str>;

    /// Human-readable rendering; see [`render`].
    fn render(&self) -> String {
        render(self)
    }
}

impl Signature for SignatureMetadata {
    type Field = FieldDescriptor;

    fn inputs(&self) -> &[FieldDescriptor] {
        &self.inputs
    }

    fn outputs(&self) -> &[FieldDescriptor] {
        &self.outputs
    }

    fn instruction(&self) -> Option<&str> {
        self.instruction.as_deref()
    }
}

/// Render a signature as an `Inputs:` block, an `Outputs:` block and an
/// optional `Instruction:` line.
///
/// Each field is one line, `  - <name> [<type>] (<description>)`; the type
/// is omitted for text fields. An empty instruction is not rendered.
pub fn render<S: Signature + ?Sized>(sig: &S) -> String {
    let mut out = String::from("Inputs:\n");
    render_fields(&mut out, sig.inputs());
    out.push_str("Outputs:\n");
    render_fields(&mut out, sig.outputs());
    if let Some(instruction) = sig.instruction().filter(|text| !text.is_empty()) {
        out.push_str("Instruction: ");
        out.push_str(instruction);
        out.push('\n');
    }
    out
}

fn render_fields<F: FieldLike>(out: &mut String, fields: &[F]) {
    for field in fields {
        out.push_str("  - ");
        out.push_str(field.name());
        if field.field_type() != FieldType::Text {
            out.push_str(" [");
            out.push_str(field.field_type().as_str());
            out.push(']');
        }
        out.push_str(" (");
        out.push_str(field.description());
        out.push_str(")\n");
    }
}

impl fmt::Display for SignatureMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignatureMetadata {
        SignatureMetadata::new(
            vec![FieldDescriptor::new("question", FieldType::Text).with_description("question")],
            vec![
                FieldDescriptor::new("answer", FieldType::String).with_description("answer"),
                FieldDescriptor::new("confidence", FieldType::Int).with_description("confidence"),
            ],
        )
    }

    #[test]
    fn test_render_without_instruction() {
        assert_eq!(
            render(&sample()),
            "Inputs:\n  - question (question)\nOutputs:\n  - answer [string] (answer)\n  - confidence [int] (confidence)\n"
        );
    }

    #[test]
    fn test_render_with_instruction() {
        let rendered = sample().with_instruction("Answer briefly.").to_string();
        assert!(rendered.ends_with("Instruction: Answer briefly.\n"));

        let rendered = sample().with_instruction("").to_string();
        assert!(!rendered.contains("Instruction"));
    }

    #[test]
    fn test_append_and_prepend() {
        let meta = sample()
            .append_input("context", "Context:", "retrieved passages")
            .prepend_output("rationale", "Reasoning:", "step by step");

        assert_eq!(meta.inputs.last().map(|f| f.name.as_str()), Some("context"));
        assert_eq!(meta.outputs[0].name, "rationale");
        assert_eq!(meta.outputs[0].prefix, "Reasoning:");
        assert_eq!(meta.outputs[0].field_type, FieldType::Text);
        assert!(!meta.outputs[0].required);
        assert_eq!(meta.outputs.len(), 3);
    }

    #[test]
    fn test_lookup() {
        let meta = sample();
        assert!(meta.output("confidence").is_some());
        assert!(meta.input("confidence").is_none());
    }
}
