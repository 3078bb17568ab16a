//! Value code generation - emits the `ToValue` impl.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;

use crate::{
    attr::{ContainerAttrs, VariantAttrs},
    field_util::{ERROR_DATA_ENUM, add_trait_bounds, named_fields, transparent_field},
};

/// Generate the `ToValue` implementation for a type.
///
/// Records are keyed by field identifier, the binding name the validator
/// looks fields up by. Unit enums become their variant name.
pub fn impl_to_value(
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
            let member = transparent_field(name, &data_struct.fields)?.member;
            quote! { ::tysig::ToValue::to_value(&self.#member) }
        }
        syn::Data::Struct(data_struct) => {
            let fields = named_fields(name, &data_struct.fields)?;
            let with_calls = fields.iter().map(|field| {
                let ident = field.ident;
                let ident_str = &field.ident_str;
                quote! { .with(#ident_str, ::tysig::ToValue::to_value(&self.#ident)) }
            });
            quote! {
                ::tysig::Value::Record(::tysig::Record::new(#type_name) #(#with_calls)*)
            }
        }
        syn::Data::Enum(data_enum) => {
            let mut arms = Vec::new();
            for variant in &data_enum.variants {
                if !matches!(variant.fields, syn::Fields::Unit) {
                    return Err(syn::Error::new_spanned(variant, ERROR_DATA_ENUM));
                }
                let ident = &variant.ident;
                let variant_name = VariantAttrs::from_ast(&variant.attrs)?
                    .effective_name(&ident.to_string(), container_attrs);
                arms.push(quote! {
                    Self::#ident => ::tysig::Value::String(#variant_name.to_string()),
                });
            }
            quote! {
                match *self {
                    #(#arms)*
                }
            }
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "ToValue cannot be derived for unions",
            ));
        }
    };

    let generics = add_trait_bounds(input.generics.clone(), &quote!(::tysig::ToValue));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tysig::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::tysig::Value {
                #body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_identifiers() {
        let input: DeriveInput = syn::parse_quote! {
            struct Query {
                #[sig(name = "q")]
                question: String,
                #[sig(skip)]
                scratch: Vec<u8>,
            }
        };
        let tokens = impl_to_value(&input, &ContainerAttrs::default())
            .unwrap()
            .to_string();
        assert!(tokens.contains(". with (\"question\""));
        assert!(!tokens.contains("scratch"));
    }

    #[test]
    fn test_enum_arms() {
        let input: DeriveInput = syn::parse_quote! {
            enum Mode { Fast, Slow }
        };
        let tokens = impl_to_value(&input, &ContainerAttrs::default())
            .unwrap()
            .to_string();
        assert!(tokens.contains("Self :: Fast"));
        assert!(tokens.contains("\"Slow\""));
    }
}
