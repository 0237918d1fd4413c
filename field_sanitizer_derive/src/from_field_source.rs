use proc_macro2::TokenStream;
use quote::quote;

use crate::attributes::FieldOptions;
use crate::extract_struct_fields_from_ast;

pub fn impl_from_field_source(ast: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = extract_struct_fields_from_ast(ast)?;

    let mut read_fields = Vec::with_capacity(fields.len());
    for field in fields {
        let member = &field.ident;
        let FieldOptions {
            field_name,
            rule_variant,
            allowed,
        } = FieldOptions::from_field(field)?;

        read_fields.push(quote! {
            #member: {
                let allowed: &[&str] = &[#(#allowed),*];
                ::field_sanitizer::FromSanitized::from_sanitized(sanitizer.sanitize_as(
                    #field_name,
                    ::field_sanitizer::SanitizeType::#rule_variant,
                    allowed,
                ))
            },
        });
    }

    Ok(quote! {
        // SOURCE -> sanitize each field -> STRUCT
        #[automatically_derived]
        impl #impl_generics ::field_sanitizer::FromFieldSource for #name #ty_generics #where_clause {
            fn from_field_source<__Source>(source: &__Source) -> Self
            where
                __Source: ::field_sanitizer::RawFieldSource + ?Sized,
            {
                let sanitizer = ::field_sanitizer::FieldSanitizer::new(source);
                Self {
                    #(#read_fields)*
                }
            }
        }
    })
}
