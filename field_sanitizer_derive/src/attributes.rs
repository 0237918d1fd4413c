use proc_macro2::Ident;
use quote::format_ident;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Field, LitStr, Token};

const RULES: [(&str, &str); 8] = [
    ("text", "Text"),
    ("email", "Email"),
    ("number", "Number"),
    ("url", "Url"),
    ("checkbox", "Checkbox"),
    ("textarea", "Textarea"),
    ("key", "Key"),
    ("radio", "Radio"),
];

/// Options of one member, read from its `#[field(...)]` attributes.
pub struct FieldOptions {
    pub field_name: LitStr,
    pub rule_variant: Ident,
    pub allowed: Vec<LitStr>,
}

impl FieldOptions {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "Field needs a name"))?;

        let mut rule: Option<LitStr> = None;
        let mut rename: Option<LitStr> = None;
        let mut allowed: Vec<LitStr> = Vec::new();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("field")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rule") {
                    rule = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("allowed") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let values = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    allowed.extend(values);
                    Ok(())
                } else {
                    Err(meta.error("expected `rule`, `rename` or `allowed`"))
                }
            })?;
        }

        let rule_variant = match &rule {
            None => format_ident!("Text"),
            Some(tag) => RULES
                .iter()
                .find(|(name, _)| *name == tag.value())
                .map(|(_, variant)| format_ident!("{}", variant))
                .ok_or_else(|| {
                    syn::Error::new_spanned(
                        tag,
                        format!("Unknown sanitize rule `{}`", tag.value()),
                    )
                })?,
        };

        if !allowed.is_empty() && rule_variant != "Radio" {
            return Err(syn::Error::new_spanned(
                &allowed[0],
                "`allowed` only applies to `rule = \"radio\"`",
            ));
        }

        let field_name = rename
            .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

        Ok(FieldOptions {
            field_name,
            rule_variant,
            allowed,
        })
    }
}
