use crate::{RawFieldSource, SanitizedValue};

/// A tainted value that can be cleared by running it through a sanitizer.
///
/// The sanitizer receives the raw value and returns the trusted one; it may change the type
/// (a checkbox string becomes a `bool`). If the value cannot be sanitized, an error must be
/// returned instead.
pub trait SanitizeWith<Insecure, Trusted> {
    /// Sanitizes the value using the provided sanitizer.
    fn sanitize_with<Sanitizer, Error>(self, sanitizer: Sanitizer) -> Result<Trusted, Error>
    where
        Sanitizer: FnOnce(Insecure) -> Result<Trusted, Error>;
}

/// Builds a value by sanitizing every field it needs from a raw field source.
///
/// Usually implemented through `#[derive(FromFieldSource)]`:
/// ```rust
/// use field_sanitizer::{FormBody, FromFieldSource};
///
/// #[derive(FromFieldSource)]
/// struct Signup {
///     #[field(rule = "email")]
///     email: Option<String>,
///     #[field(rule = "checkbox")]
///     newsletter: bool,
///     #[field(rule = "radio", allowed("silver", "gold"))]
///     plan: Option<String>,
/// }
///
/// let body = FormBody::parse(b"email=ann%40example.com&newsletter=on&plan=platinum");
/// let signup = Signup::from_field_source(&body);
///
/// assert_eq!(signup.email.as_deref(), Some("ann@example.com"));
/// assert!(signup.newsletter);
/// assert_eq!(signup.plan, None);
/// ```
pub trait FromFieldSource: Sized {
    /// Sanitizes the fields of `source` into `Self`.
    fn from_field_source<S>(source: &S) -> Self
    where
        S: RawFieldSource + ?Sized;
}

/// Conversion from the result of a single sanitized field into a struct member.
///
/// Implemented for the member types `#[derive(FromFieldSource)]` supports. `None` is the
/// absence marker: the field was not submitted, or a radio value was rejected.
pub trait FromSanitized: Sized {
    /// Converts the sanitizer result for one field.
    fn from_sanitized(value: Option<SanitizedValue>) -> Self;
}

impl FromSanitized for Option<SanitizedValue> {
    fn from_sanitized(value: Option<SanitizedValue>) -> Self {
        value
    }
}

impl FromSanitized for Option<String> {
    fn from_sanitized(value: Option<SanitizedValue>) -> Self {
        value.map(SanitizedValue::into_text)
    }
}

impl FromSanitized for Option<bool> {
    fn from_sanitized(value: Option<SanitizedValue>) -> Self {
        value.map(|value| value.to_flag())
    }
}

/// A field that was not submitted becomes an empty string.
impl FromSanitized for String {
    fn from_sanitized(value: Option<SanitizedValue>) -> Self {
        Option::<String>::from_sanitized(value).unwrap_or_default()
    }
}

/// Browsers do not submit unchecked checkboxes, so an absent field is `false`.
impl FromSanitized for bool {
    fn from_sanitized(value: Option<SanitizedValue>) -> Self {
        Option::<bool>::from_sanitized(value).unwrap_or(false)
    }
}
