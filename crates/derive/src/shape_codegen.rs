//! Shape code generation - emits the `Introspect` impl that builds a
//! `::tysig::Shape` at runtime.

use std::collections::HashSet;

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Fields};

use crate::{
    attr::{ContainerAttrs, VariantAttrs, extract_doc_comment},
    field_util::{ERROR_DATA_ENUM, NamedField, add_trait_bounds, named_fields, transparent_field},
};

/// Generate the `Introspect` implementation for a type.
pub fn impl_introspect(
    input: &DeriveInput,
    container_attrs: &ContainerAttrs,
) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let type_name = container_attrs
        .name
        .clone()
        .unwrap_or_else(|| name.to_string());

    let body = match &input.data {
        syn::Data::Struct(data_struct) if container_attrs.transparent => {
            let inner = transparent_field(name, &data_struct.fields)?;
            let ty = inner.ty;
            quote! { <#ty as ::tysig::Introspect>::shape() }
        }
        syn::Data::Struct(data_struct) => {
            let kind = generate_record_kind(name, &data_struct.fields, container_attrs)?;
            quote! { ::tysig::Shape::of::<Self>(#type_name, #kind) }
        }
        syn::Data::Enum(data_enum) => {
            let kind = generate_enum_kind(data_enum, container_attrs)?;
            quote! { ::tysig::Shape::of::<Self>(#type_name, #kind) }
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Introspect cannot be derived for unions",
            ));
        }
    };

    let generics = add_trait_bounds(input.generics.clone(), &quote!(::tysig::Introspect));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tysig::Introspect for #name #ty_generics #where_clause {
            fn shape() -> ::tysig::Shape {
                #body
            }
        }
    })
}

/// Generate `ShapeKind::Record` tokens for a struct's fields.
fn generate_record_kind(
    name: &syn::Ident,
    fields: &Fields,
    container_attrs: &ContainerAttrs,
) -> syn::Result<TokenStream2> {
    let fields = named_fields(name, fields)?;
    check_unique_names(&fields, container_attrs)?;
    let field_tokens: Vec<TokenStream2> = fields
        .iter()
        .map(|field| generate_field_decl(field, container_attrs))
        .collect();

    Ok(quote! {
        ::tysig::ShapeKind::Record(vec![#(#field_tokens),*])
    })
}

/// Generate `FieldDecl` tokens for a struct field.
fn generate_field_decl(field: &NamedField<'_>, container_attrs: &ContainerAttrs) -> TokenStream2 {
    let ident_str = &field.ident_str;
    let ty = field.ty;
    let directives = generate_directives(field, container_attrs);
    let doc = extract_doc_comment(&field.field.attrs).map(|doc| quote! { .with_doc(#doc) });

    quote! {
        ::tysig::FieldDecl::new(#ident_str, <#ty as ::tysig::Introspect>::shape())
            .with_directives(#directives)
            #doc
    }
}

/// Name written into the directives: `name = ".."`, else the `rename_all`
/// result unless a tag already names the field.
fn name_override(field: &NamedField<'_>, container_attrs: &ContainerAttrs) -> Option<String> {
    field.attrs.name.clone().or_else(|| {
        if field.attrs.has_explicit_name() {
            None
        } else {
            container_attrs.rename(&field.ident_str)
        }
    })
}

/// Reject two fields that resolve to the same metadata name or the same
/// schema property name.
///
/// Metadata names default to the lower-cased identifier, schema names to the
/// identifier as written.
fn check_unique_names(fields: &[NamedField<'_>], container_attrs: &ContainerAttrs) -> syn::Result<()> {
    let mut metadata_names = HashSet::new();
    let mut schema_names = HashSet::new();

    for field in fields {
        let explicit = name_override(field, container_attrs)
            .or_else(|| field.attrs.tag_name().map(str::to_string));
        let (metadata_name, schema_name) = match explicit {
            Some(name) => (name.clone(), name),
            None => (field.ident_str.to_lowercase(), field.ident_str.clone()),
        };

        for (name, seen) in [
            (metadata_name, &mut metadata_names),
            (schema_name, &mut schema_names),
        ] {
            if !seen.insert(name.clone()) {
                return Err(syn::Error::new_spanned(
                    field.field,
                    format!("duplicate field name `{name}`"),
                ));
            }
        }
    }
    Ok(())
}

/// Generate `Directives` builder tokens for a struct field.
fn generate_directives(field: &NamedField<'_>, container_attrs: &ContainerAttrs) -> TokenStream2 {
    let attrs = &field.attrs;
    let mut tokens = quote! { ::tysig::Directives::default() };

    if let Some(tag) = &attrs.tag {
        tokens.extend(quote! { .with_tag(#tag) });
    }
    if let Some(name) = name_override(field, container_attrs) {
        tokens.extend(quote! { .named(#name) });
    }
    if attrs.required {
        tokens.extend(quote! { .required() });
    }
    if let Some(description) = &attrs.description {
        tokens.extend(quote! { .describe(#description) });
    }
    if let Some(prefix) = &attrs.prefix {
        tokens.extend(quote! { .with_prefix(#prefix) });
    }
    if attrs.optional {
        tokens.extend(quote! { .optional() });
    }
    tokens
}

/// Generate `ShapeKind::Enum` tokens for a unit-only enum.
fn generate_enum_kind(
    data_enum: &syn::DataEnum,
    container_attrs: &ContainerAttrs,
) -> syn::Result<TokenStream2> {
    let mut names = Vec::new();
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(variant, ERROR_DATA_ENUM));
        }
        let attrs = VariantAttrs::from_ast(&variant.attrs)?;
        if attrs.skip {
            continue;
        }
        names.push(attrs.effective_name(&variant.ident.to_string(), container_attrs));
    }

    Ok(quote! {
        ::tysig::ShapeKind::Enum(vec![#(#names.to_string()),*])
    })
}
