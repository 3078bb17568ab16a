//! Shared field utilities for the derive macros.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Fields, GenericParam, Generics};

use crate::attr::FieldAttrs;

// =============================================================================
// Error Message Constants
// =============================================================================

pub const ERROR_TRANSPARENT_FIELDS: &str =
    "#[sig(transparent)] requires exactly one non-skipped field";

pub const ERROR_TUPLE_STRUCT: &str =
    "tuple structs need #[sig(transparent)]; only named fields become record fields";

pub const ERROR_DATA_ENUM: &str = "only enums whose variants are all unit variants are supported";

// =============================================================================
// Named fields
// =============================================================================

/// A named, non-skipped struct field with its parsed attributes.
pub struct NamedField<'a> {
    pub ident: &'a syn::Ident,
    /// Identifier as written, without any `r#` prefix.
    pub ident_str: String,
    pub ty: &'a syn::Type,
    pub attrs: FieldAttrs,
    pub field: &'a syn::Field,
}

/// Collect the non-skipped named fields of a struct. Unit structs have none.
pub fn named_fields<'a>(name: &syn::Ident, fields: &'a Fields) -> syn::Result<Vec<NamedField<'a>>> {
    match fields {
        Fields::Named(named) => {
            let mut out = Vec::new();
            for field in &named.named {
                let attrs = FieldAttrs::from_ast(&field.attrs)?;
                if attrs.skip {
                    continue;
                }
                let Some(ident) = field.ident.as_ref() else {
                    return Err(syn::Error::new_spanned(field, "expected named field"));
                };
                out.push(NamedField {
                    ident,
                    ident_str: ident.unraw().to_string(),
                    ty: &field.ty,
                    attrs,
                    field,
                });
            }
            Ok(out)
        }
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(name, ERROR_TUPLE_STRUCT)),
        Fields::Unit => Ok(Vec::new()),
    }
}

// =============================================================================
// Transparent structs
// =============================================================================

/// The single inner field of a transparent struct.
pub struct TransparentField<'a> {
    /// `self.<member>` accessor.
    pub member: TokenStream2,
    pub ty: &'a syn::Type,
}

/// Validate a transparent struct and return its single active field.
pub fn transparent_field<'a>(
    name: &syn::Ident,
    fields: &'a Fields,
) -> syn::Result<TransparentField<'a>> {
    match fields {
        Fields::Named(_) => {
            let active = named_fields(name, fields)?;
            let [field] = active.as_slice() else {
                return Err(syn::Error::new_spanned(name, ERROR_TRANSPARENT_FIELDS));
            };
            let ident = field.ident;
            Ok(TransparentField {
                member: quote!(#ident),
                ty: field.ty,
            })
        }
        Fields::Unnamed(unnamed) => {
            let mut iter = unnamed.unnamed.iter();
            match (iter.next(), iter.next()) {
                (Some(field), None) => Ok(TransparentField {
                    member: quote!(0),
                    ty: &field.ty,
                }),
                _ => Err(syn::Error::new_spanned(name, ERROR_TRANSPARENT_FIELDS)),
            }
        }
        Fields::Unit => Err(syn::Error::new_spanned(name, ERROR_TRANSPARENT_FIELDS)),
    }
}

// =============================================================================
// Generics
// =============================================================================

/// Add `bound` to every type parameter.
pub fn add_trait_bounds(mut generics: Generics, bound: &TokenStream2) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(syn::parse_quote!(#bound));
        }
    }
    generics
}
