//! Derive macros for tysig.
//!
//! This crate provides derive macros:
//!
//! - `#[derive(Introspect)]` - Implements `tysig::Introspect`, the shape
//!   table read by the introspector and the schema synthesizer
//! - `#[derive(ToValue)]` - Implements `tysig::ToValue`, the dynamic view
//!   checked by the validator
//! - `#[derive(Typed)]` - Implements both
//!
//! All derives share the `#[sig(...)]` attribute namespace.
//!
//! # Example
//!
//! ```ignore
//! use tysig::Typed;
//!
//! #[derive(Typed)]
//! struct Answer {
//!     /// The final answer.
//!     #[sig(field = "answer,required", prefix = "Answer:")]
//!     text: String,
//!     #[sig(optional, desc = "Model confidence in [0, 1]")]
//!     confidence: Option<f64>,
//! }
//! ```
//!
//! # Container Attributes
//!
//! - `#[sig(name = "Name")]` - Type name recorded in the shape
//! - `#[sig(rename_all = "camelCase")]` - Rename all fields (camelCase, snake_case, PascalCase or lowercase)
//! - `#[sig(transparent)]` - Look like the single inner field
//!
//! # Field Attributes
//!
//! - `#[sig(name = "name")]` - External name
//! - `#[sig(field = "name,required")]` - Compact name and required flag
//! - `#[sig(required)]` - Reject missing or zero values
//! - `#[sig(desc = "...")]` - Description
//! - `#[sig(prefix = "...")]` - Prompt prefix
//! - `#[sig(optional)]` - Not required in schema documents
//! - `#[sig(skip)]` - Skip this field entirely
//!
//! # Variant Attributes
//!
//! - `#[sig(name = "Name")]` - Rename this variant
//! - `#[sig(skip)]` - Leave this variant out of the schema

mod attr;
mod field_util;
mod shape_codegen;
mod value_codegen;

use attr::ContainerAttrs;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derive macro for `tysig::Introspect`.
///
/// Supported on structs with named fields, unit structs, transparent
/// newtypes and unit-only enums.
#[proc_macro_derive(Introspect, attributes(sig))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let container_attrs = match ContainerAttrs::from_ast(&input.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    match shape_codegen::impl_introspect(&input, &container_attrs) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro for `tysig::ToValue`.
///
/// # Example
///
/// ```ignore
/// use tysig::{ToValue, Value};
///
/// #[derive(ToValue)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let value = Point { x: 1, y: 0 }.to_value();
/// assert!(!value.is_zero());
/// ```
#[proc_macro_derive(ToValue, attributes(sig))]
pub fn derive_to_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let container_attrs = match ContainerAttrs::from_ast(&input.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    match value_codegen::impl_to_value(&input, &container_attrs) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive macro that implements `Introspect` and `ToValue`.
#[proc_macro_derive(Typed, attributes(sig))]
pub fn derive_typed(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let container_attrs = match ContainerAttrs::from_ast(&input.attrs) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    let shape_result = shape_codegen::impl_introspect(&input, &container_attrs);
    let value_result = value_codegen::impl_to_value(&input, &container_attrs);

    match (shape_result, value_result) {
        (Ok(shape), Ok(value)) => {
            let combined = quote! {
                #shape
                #value
            };
            combined.into()
        }
        (Err(e), _) | (_, Err(e)) => e.to_compile_error().into(),
    }
}
