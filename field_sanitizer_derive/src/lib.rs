//! This crate contains the proc macro definitions for the `field_sanitizer` crate.
//!
//! All proc macros are reexported in the `field_sanitizer` crate, so
//! you should properly use that crate instead.
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields};

mod attributes;
mod from_field_source;

/// Implements `field_sanitizer::FromFieldSource` for a struct with named fields.
///
/// Each member is read from the raw field source and sanitized on its own. The member type
/// decides what an absent field turns into (see `field_sanitizer::FromSanitized`):
/// `Option<String>`, `Option<bool>` and `Option<SanitizedValue>` keep the absence as `None`,
/// `String` becomes empty and `bool` becomes `false`.
///
/// Members are configured with the `#[field(...)]` attribute:
/// - `rule = "email"`: the sanitizing rule, one of `text`, `email`, `number`, `url`,
///   `checkbox`, `textarea`, `key`, `radio`. Defaults to `text`.
/// - `rename = "e-mail"`: the submitted field name. Defaults to the member name.
/// - `allowed("a", "b")`: the accepted values of a `radio` member.
///
/// ```rust
/// use field_sanitizer::{FormBody, FromFieldSource};
///
/// #[derive(FromFieldSource)]
/// struct Contact {
///     name: String,
///     #[field(rule = "email", rename = "e-mail")]
///     email: Option<String>,
///     #[field(rule = "textarea")]
///     message: String,
///     #[field(rule = "radio", allowed("phone", "email"))]
///     reply_by: Option<String>,
/// }
///
/// let body = FormBody::parse(b"name=+Ann+&e-mail=ann%40example.com&message=Hi%0Athere&reply_by=fax");
/// let contact = Contact::from_field_source(&body);
///
/// assert_eq!(contact.name, "Ann");
/// assert_eq!(contact.email.as_deref(), Some("ann@example.com"));
/// assert_eq!(contact.message, "Hi\nthere");
/// assert_eq!(contact.reply_by, None);
/// ```
///
/// Unknown rules and attribute keys are compile errors:
/// ```compile_fail
/// use field_sanitizer::FromFieldSource;
///
/// #[derive(FromFieldSource)]
/// struct Broken {
///     #[field(rule = "dropdown")]
///     choice: String,
/// }
/// ```
#[proc_macro_derive(FromFieldSource, attributes(field))]
pub fn from_field_source_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    from_field_source::impl_from_field_source(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn extract_struct_fields_from_ast(ast: &DeriveInput) -> syn::Result<&Punctuated<Field, Comma>> {
    match &ast.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => Ok(&fields_named.named),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                &ast.ident,
                "Tuple structs are not supported, fields need names to be looked up",
            )),
            Fields::Unit => Err(syn::Error::new_spanned(
                &ast.ident,
                "Unit structs are not supported",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &ast.ident,
            "Only structs are supported",
        )),
    }
}
