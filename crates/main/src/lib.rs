//! tysig - typed signature metadata for model-calling programs
//!
//! This crate turns statically declared input and output types into:
//! - **Field metadata**: a recursive description of every field, with
//!   names, descriptions, prompt prefixes and semantic types
//! - **Schema documents**: JSON schemas for structured model output
//! - **Validation**: required-field checks at any nesting depth
//!
//! Metadata is memoized per type pair by a [`SignatureRegistry`], and
//! bridges to untyped signatures written in shorthand (`question -> answer`).
//!
//! # Example
//!
//! ```
//! use tysig::{Introspect, SignatureRegistry, ToValue, TypedSignature, schema_for};
//!
//! #[derive(Introspect, ToValue)]
//! struct Question {
//!     #[sig(required, desc = "The user question")]
//!     question: String,
//! }
//!
//! #[derive(Introspect, ToValue)]
//! struct Answer {
//!     #[sig(field = "answer,required")]
//!     text: String,
//!     confidence: f64,
//! }
//!
//! let registry = SignatureRegistry::new();
//! let sig = TypedSignature::<Question, Answer>::cached(&registry);
//!
//! assert_eq!(
//!     sig.to_string(),
//!     "Inputs:\n  - question [string] (The user question)\nOutputs:\n  - answer [string] (text)\n  - confidence (confidence)\n"
//! );
//! assert!(sig.validate_output(&Answer { text: String::new(), confidence: 0.9 }).is_err());
//!
//! let schema = schema_for::<Answer>();
//! assert_eq!(schema.required, ["answer", "confidence"]);
//! ```

#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unreachable)]
#![deny(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

extern crate self as tysig;

pub mod error;
pub mod field;
pub mod introspect;
pub mod legacy;
pub mod options;
pub mod registry;
pub mod schema;
pub mod shape;
pub mod signature;
pub mod validate;
pub mod value;

pub use crate::{
    error::{Error, FieldPath, MalformedReason, Result, SchemaDecodeError, ValidationError,
        ValidationErrorKind, ValidationResult},
    field::{FieldDescriptor, FieldType, TypeRef},
    introspect::{Role, classify, describe, describe_field, describe_fields},
    legacy::{LegacyField, LegacySignature},
    options::Options,
    registry::{RegistryStats, SignatureCacheKey, SignatureRegistry, TypedSignature},
    schema::{SchemaNode, SchemaType, schema_for, synthesize},
    shape::{Directives, FieldDecl, Introspect, Shape, ShapeKind},
    signature::{FieldLike, Signature, SignatureMetadata, parse_shorthand, render},
    validate::{validate, validate_typed},
    value::{Record, ToValue, Value},
};

#[cfg(feature = "derive")]
pub use tysig_derive::{Introspect, ToValue, Typed};
