//! The individual sanitizing rules.
//!
//! Each rule is a pure function over the raw submitted string. They are public so callers can
//! apply a rule to a value that did not come from a [`RawFieldSource`](crate::RawFieldSource).

mod email;
mod scalar;
mod text;
mod url;

pub use email::sanitize_email;
pub use scalar::{sanitize_checkbox, sanitize_key, sanitize_number_int};
pub use text::{sanitize_text_field, sanitize_textarea_field};
pub use self::url::{sanitize_url, ALLOWED_PROTOCOLS};

/// Returns the text-cleaned value if `value` exactly equals one entry of `allowed_values`.
///
/// ```rust
/// use field_sanitizer::rules::sanitize_radio;
///
/// let plans = ["silver", "gold", "bronze"];
/// assert_eq!(sanitize_radio("gold", &plans), Some("gold".to_owned()));
/// assert_eq!(sanitize_radio("Gold", &plans), None);
/// ```
pub fn sanitize_radio<A: AsRef<str>>(value: &str, allowed_values: &[A]) -> Option<String> {
    allowed_values
        .iter()
        .any(|allowed| allowed.as_ref() == value)
        .then(|| sanitize_text_field(value))
}

/// Characters trimmed from both ends of text: space, tab, newlines, NUL and vertical tab.
pub(crate) fn trim_blank(value: &str) -> &str {
    value.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}
