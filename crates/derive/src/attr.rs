//! Attribute parsing for the tysig derives.
//!
//! `#[derive(Introspect)]`, `#[derive(ToValue)]` and `#[derive(Typed)]` all
//! read the `#[sig(...)]` attribute namespace.

use syn::{Attribute, Expr, Lit, Meta};

/// Rename strategy applied by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum RenameRule {
    /// camelCase
    CamelCase,
    /// snake_case
    SnakeCase,
    /// PascalCase
    PascalCase,
    /// lowercase, words run together
    LowerCase,
}

impl RenameRule {
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "camelCase" => RenameRule::CamelCase,
            "snake_case" => RenameRule::SnakeCase,
            "PascalCase" => RenameRule::PascalCase,
            "lowercase" => RenameRule::LowerCase,
            _ => return None,
        })
    }

    /// Rename an identifier, treating `_` and upper-case letters as word
    /// boundaries.
    pub fn apply(self, ident: &str) -> String {
        let words = split_words(ident);
        match self {
            RenameRule::SnakeCase => words.join("_"),
            RenameRule::LowerCase => words.concat(),
            RenameRule::PascalCase => words.iter().map(|word| capitalize(word)).collect(),
            RenameRule::CamelCase => words
                .iter()
                .enumerate()
                .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
                .collect(),
        }
    }
}

/// Container-level attributes parsed from `#[sig(...)]`.
///
/// # Attributes
///
/// - `name = "..."` - Type name recorded in the shape (defaults to the
///   identifier); array items are named after it
/// - `rename_all = "..."` - Apply a rename rule to every field/variant
///   without an explicit name
/// - `transparent` - Look like the single inner field
///
/// # Example
///
/// ```ignore
/// #[derive(Introspect, ToValue)]
/// #[sig(transparent)]
/// struct UserId(u64);
/// ```
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub name: Option<String>,
    pub rename_all: Option<RenameRule>,
    pub transparent: bool,
}

impl ContainerAttrs {
    /// Parse container attributes from a list of attributes.
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        parse_sig_attrs(attrs, |result: &mut Self, meta| {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("transparent") {
                        result.transparent = true;
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("name") {
                        result.name = Some(get_lit_str(&nv.value)?);
                    } else if nv.path.is_ident("rename_all") {
                        let s = get_lit_str(&nv.value)?;
                        result.rename_all = RenameRule::parse(&s);
                        if result.rename_all.is_none() {
                            return Err(syn::Error::new_spanned(
                                &nv.value,
                                format!("unknown rename rule: {s}"),
                            ));
                        }
                    }
                }
                Meta::List(_) => {}
            }
            Ok(())
        })
    }

    /// Name produced by `rename_all`, if set.
    pub fn rename(&self, original: &str) -> Option<String> {
        self.rename_all.map(|rule| rule.apply(original))
    }
}

/// Field-level attributes parsed from `#[sig(...)]`.
///
/// # Attributes
///
/// - `name = "..."` - External name (defaults to the lower-cased identifier)
/// - `field = "name,required"` - Compact form of `name` and `required`; an
///   empty name part keeps the default
/// - `required` - Validation rejects a missing or zero value
/// - `desc = "..."` / `description = "..."` - Description (defaults to the
///   identifier in metadata, the doc comment in schemas)
/// - `prefix = "..."` - Prompt prefix
/// - `optional` - Leave the property out of the schema's `required` list
/// - `skip` - Leave the field out entirely
#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub prefix: Option<String>,
    pub optional: bool,
    pub skip: bool,
}

impl FieldAttrs {
    /// Parse field attributes from a list of attributes.
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        parse_sig_attrs(attrs, |result: &mut Self, meta| {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("required") {
                        result.required = true;
                    } else if path.is_ident("optional") {
                        result.optional = true;
                    } else if path.is_ident("skip") {
                        result.skip = true;
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("name") {
                        result.name = Some(get_lit_str(&nv.value)?);
                    } else if nv.path.is_ident("field") {
                        result.tag = Some(get_lit_str(&nv.value)?);
                    } else if nv.path.is_ident("desc") || nv.path.is_ident("description") {
                        result.description = Some(get_lit_str(&nv.value)?);
                    } else if nv.path.is_ident("prefix") {
                        result.prefix = Some(get_lit_str(&nv.value)?);
                    }
                }
                Meta::List(_) => {}
            }
            Ok(())
        })
    }

    /// Name part of the `field = ".."` tag, when not empty.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .and_then(|tag| tag.split(',').next())
            .filter(|name| !name.is_empty())
    }

    /// True when the name comes from `name = ".."` or a non-empty tag name.
    pub fn has_explicit_name(&self) -> bool {
        self.name.is_some() || self.tag_name().is_some()
    }
}

/// Variant-level attributes parsed from `#[sig(...)]`.
#[derive(Debug, Default)]
pub struct VariantAttrs {
    pub name: Option<String>,
    pub skip: bool,
}

impl VariantAttrs {
    /// Parse variant attributes from a list of attributes.
    pub fn from_ast(attrs: &[Attribute]) -> syn::Result<Self> {
        parse_sig_attrs(attrs, |result: &mut Self, meta| {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("skip") {
                        result.skip = true;
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("name") {
                        result.name = Some(get_lit_str(&nv.value)?);
                    }
                }
                Meta::List(_) => {}
            }
            Ok(())
        })
    }

    /// Get the effective variant name.
    pub fn effective_name(&self, original: &str, container: &ContainerAttrs) -> String {
        self.name
            .clone()
            .or_else(|| container.rename(original))
            .unwrap_or_else(|| original.to_string())
    }
}

/// Extract the doc comment from attributes.
pub fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(syn::ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &meta.value
        {
            let value = lit_str.value();
            // rustdoc keeps the space after `///`
            let trimmed = value.strip_prefix(' ').unwrap_or(&value);
            docs.push(trimmed.to_string());
        }
    }

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Parse `#[sig(...)]` attributes using a callback handler.
fn parse_sig_attrs<T, F>(attrs: &[Attribute], mut handler: F) -> syn::Result<T>
where
    T: Default,
    F: FnMut(&mut T, &Meta) -> syn::Result<()>,
{
    let mut result = T::default();

    for attr in attrs {
        if !attr.path().is_ident("sig") {
            continue;
        }

        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;

        for meta in nested {
            handler(&mut result, &meta)?;
        }
    }

    Ok(result)
}

/// Extract a string literal from an expression.
fn get_lit_str(expr: &Expr) -> syn::Result<String> {
    if let Expr::Lit(syn::ExprLit {
        lit: Lit::Str(lit_str),
        ..
    }) = expr
    {
        Ok(lit_str.value())
    } else {
        Err(syn::Error::new_spanned(expr, "expected string literal"))
    }
}

/// Lower-cased words of an identifier.
fn split_words(ident: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in ident.chars() {
        if c == '_' || (c.is_uppercase() && !current.is_empty()) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if c == '_' {
                continue;
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
