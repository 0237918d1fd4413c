//! # Field Sanitizer
//! This crate reads fields from a submitted HTTP form and cleans them with one of a fixed set
//! of sanitizing rules before they are used.
//!
//! Everything a client submits is untrusted. Raw values are handed out wrapped in
//! [`UntrustedValue`], so the only way to get at them is through a sanitizing rule. The rule is
//! picked by a sanitize-type tag:
//!
//! | tag | result |
//! |---|---|
//! | `text` | single-line plain text without tags |
//! | `email` | cleaned address, or `""` if invalid |
//! | `number` | digits with an optional leading sign |
//! | `url` | cleaned URL with an allowed scheme, or `""` |
//! | `checkbox` | `bool` |
//! | `textarea` | multi-line plain text without tags |
//! | `key` | lowercase `[a-z0-9_-]` |
//! | `radio` | plain text, only if the value is in the allow-list |
//!
//! Any other tag is treated as `text`.
//!
//! ## Example usage
//! The raw values come from a [`RawFieldSource`], typically the decoded request body:
//! ```rust
//! use field_sanitizer::{FieldSanitizer, FormBody, SanitizedValue};
//!
//! let body = FormBody::parse(b"agree=1&plan=gold&age=abc123");
//! let sanitizer = FieldSanitizer::new(&body);
//!
//! assert_eq!(sanitizer.sanitize("agree", "checkbox", &[]), Some(SanitizedValue::Flag(true)));
//! assert_eq!(
//!     sanitizer.sanitize("plan", "radio", &["silver", "gold", "bronze"]),
//!     Some(SanitizedValue::Text("gold".into()))
//! );
//! assert_eq!(sanitizer.sanitize("age", "number", &[]), Some(SanitizedValue::Text("123".into())));
//!
//! // not submitted
//! assert_eq!(sanitizer.sanitize("newsletter", "checkbox", &[]), None);
//! ```
//!
//! `None` is returned both when a field was not submitted and when a radio value is not one of
//! the allowed values. Sanitizing never fails otherwise: an invalid email address becomes an
//! empty string, not an error.
//!
//! A whole form can be described by a [`FormSchema`], loaded from a configuration file:
//! ```rust
//! use field_sanitizer::{FieldSanitizer, FormBody, FormSchema};
//!
//! let schema = FormSchema::from_toml(r#"
//!     [[fields]]
//!     name = "email"
//!     type = "email"
//!
//!     [[fields]]
//!     name = "plan"
//!     type = "radio"
//!     allowed = ["silver", "gold"]
//! "#)?;
//!
//! let body = FormBody::parse(b"email=ann%40example.com&plan=platinum");
//! let form = FieldSanitizer::new(&body).sanitize_form(&schema);
//!
//! assert_eq!(form.get("email").and_then(|v| v.as_text()), Some("ann@example.com"));
//! assert!(form.get("plan").is_none());
//! # Ok::<(), field_sanitizer::Error>(())
//! ```
//!
//! ## Features
//! Enabled by default:
//!  * `allow_usage_without_sanitization`: enables [`UntrustedValue::use_untrusted_value`] to read
//!    a raw value without sanitizing it.
//!  * `derive`: enables `#[derive(FromFieldSource)]`, which builds a struct by sanitizing one
//!    field per member.
//!
//! ## Logging
//! The crate emits [`tracing`] events (a `sanitize_field` span per call, debug events for absent
//! fields, unrecognized tags and rejected radio values). Raw values are never logged.
#![warn(missing_docs)]

mod error;
pub use error::*;

pub mod rules;

mod sanitize_type;
pub use sanitize_type::*;

mod sanitizer;
pub use sanitizer::*;

mod schema;
pub use schema::*;

mod source;
pub use source::*;

mod traits;
pub use traits::*;

mod untrusted_value;
pub use untrusted_value::*;

#[cfg(feature = "derive")]
pub use field_sanitizer_derive::FromFieldSource;

/// Derive macros, also re-exported at the crate root.
#[cfg(feature = "derive")]
pub mod derive {
    pub use field_sanitizer_derive::*;
}

pub use config::FileFormat;
