//! Schema documents for structured model output.
//!
//! This module provides:
//! - [`SchemaNode`] and [`SchemaType`], the document model, serialized with
//!   camelCase keys and upper-case type tags
//! - [`synthesize`] and [`schema_for`], which derive a document from a
//!   declared shape
//! - [`SchemaNode::from_json`] and friends, which decode pre-authored
//!   documents
//!
//! Synthesized documents use the opposite default to the introspector:
//! every property is required unless the field is marked
//! `#[sig(optional)]`.
//!
//! # Creating Schemas Manually
//!
//! ```rust
//! use tysig::SchemaNode;
//!
//! let schema = SchemaNode::object()
//!     .with_property("city", SchemaNode::string().with_description("City name"), true)
//!     .with_property("population", SchemaNode::integer(), false);
//!
//! assert_eq!(
//!     schema.to_json().unwrap(),
//!     r#"{"properties":{"city":{"description":"City name","type":"STRING"},"population":{"type":"INTEGER"}},"propertyOrdering":["city","population"],"required":["city"],"type":"OBJECT"}"#
//! );
//! ```

mod decode;
mod synth;
mod types;

pub use synth::{schema_for, synthesize};
pub use types::{SchemaNode, SchemaType};
