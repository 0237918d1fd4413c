use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use serde::Serialize;
use tracing::{event, span, Level};

use crate::rules;
use crate::{FormSchema, RawFieldSource, SanitizeType, SanitizeWith};

/// The cleaned value of one field.
///
/// Checkbox fields produce [`SanitizedValue::Flag`], every other rule produces
/// [`SanitizedValue::Text`]. Serializes as a plain JSON string or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SanitizedValue {
    /// Cleaned text.
    Text(String),
    /// Coerced checkbox state.
    Flag(bool),
}

impl SanitizedValue {
    /// Returns the text, or `None` for a flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SanitizedValue::Text(text) => Some(text),
            SanitizedValue::Flag(_) => None,
        }
    }

    /// Returns the flag, or `None` for text.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SanitizedValue::Text(_) => None,
            SanitizedValue::Flag(flag) => Some(*flag),
        }
    }

    /// Converts to text. Flags become `"1"` or `"0"`.
    pub fn into_text(self) -> String {
        match self {
            SanitizedValue::Text(text) => text,
            SanitizedValue::Flag(flag) => if flag { "1" } else { "0" }.to_owned(),
        }
    }

    /// Converts to a flag. Text is coerced like a checkbox value.
    pub fn to_flag(&self) -> bool {
        match self {
            SanitizedValue::Text(text) => rules::sanitize_checkbox(text),
            SanitizedValue::Flag(flag) => *flag,
        }
    }
}

impl fmt::Display for SanitizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizedValue::Text(text) => f.write_str(text),
            SanitizedValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<String> for SanitizedValue {
    fn from(text: String) -> Self {
        SanitizedValue::Text(text)
    }
}

impl From<bool> for SanitizedValue {
    fn from(flag: bool) -> Self {
        SanitizedValue::Flag(flag)
    }
}

/// The sanitized fields of a whole form, keyed by field name.
///
/// Fields that were not submitted, and radio fields whose value was rejected, are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedForm {
    fields: BTreeMap<String, SanitizedValue>,
}

impl SanitizedForm {
    /// Returns the value of `name`, or `None` if it was absent.
    pub fn get(&self, name: &str) -> Option<&SanitizedValue> {
        self.fields.get(name)
    }

    /// Number of fields with a value.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field had a value.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields with a value, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SanitizedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Reads named fields from a raw source and cleans them with a sanitizing rule.
///
/// The sanitizer holds no state besides the source, so it is cheap to build per request and
/// can be shared between threads whenever the source can.
///
/// ```rust
/// use std::collections::HashMap;
/// use field_sanitizer::{FieldSanitizer, SanitizedValue};
///
/// let mut post = HashMap::new();
/// post.insert("agree".to_owned(), "1".to_owned());
/// post.insert("plan".to_owned(), "gold".to_owned());
///
/// let sanitizer = FieldSanitizer::new(&post);
/// assert_eq!(sanitizer.sanitize("agree", "checkbox", &[]), Some(SanitizedValue::Flag(true)));
/// assert_eq!(
///     sanitizer.sanitize("plan", "radio", &["silver", "gold", "bronze"]),
///     Some(SanitizedValue::Text("gold".into()))
/// );
/// assert_eq!(sanitizer.sanitize("missing", "text", &[]), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldSanitizer<S> {
    source: S,
}

impl<S: RawFieldSource> FieldSanitizer<S> {
    /// Creates a sanitizer reading from `source`.
    pub fn new(source: S) -> Self {
        FieldSanitizer { source }
    }

    /// The raw field source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the sanitizer and returns the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Sanitizes `field_name` with the rule named by `sanitize_type`.
    ///
    /// Unrecognized tags are treated as `"text"`. `allowed_values` is only consulted for
    /// `"radio"`.
    ///
    /// Returns `None` when the field was not submitted and also when a radio value is not one
    /// of `allowed_values`; both mean "no usable value". An empty submitted value is not
    /// absent: it is sanitized like any other value.
    pub fn sanitize(
        &self,
        field_name: &str,
        sanitize_type: &str,
        allowed_values: &[&str],
    ) -> Option<SanitizedValue> {
        self.sanitize_as(
            field_name,
            SanitizeType::from_tag(sanitize_type),
            allowed_values,
        )
    }

    /// Same as [`FieldSanitizer::sanitize`] with an already resolved rule.
    pub fn sanitize_as<A: AsRef<str>>(
        &self,
        field_name: &str,
        sanitize_type: SanitizeType,
        allowed_values: &[A],
    ) -> Option<SanitizedValue> {
        let span = span!(
            Level::TRACE,
            "sanitize_field",
            field = field_name,
            rule = sanitize_type.as_tag()
        );
        let _enter = span.enter();

        let Some(raw) = self.source.raw_field(field_name) else {
            event!(Level::DEBUG, field = field_name, "Field not submitted");
            return None;
        };

        if sanitize_type == SanitizeType::Radio
            && !allowed_values.iter().any(|allowed| {
                let allowed: &str = allowed.as_ref();
                raw.is_equal_to(&allowed)
            })
        {
            event!(
                Level::DEBUG,
                field = field_name,
                allowed = allowed_values.len(),
                "Radio value not in allow-list"
            );
            return None;
        }

        let sanitized = raw
            .sanitize_with(|value| Ok::<_, Infallible>(apply_rule(sanitize_type, value)))
            .unwrap_or_else(|never| match never {});
        Some(sanitized)
    }

    /// Sanitizes every field described by `schema`.
    ///
    /// Absent fields and rejected radio values are left out of the result.
    pub fn sanitize_form(&self, schema: &FormSchema) -> SanitizedForm {
        let fields = schema
            .fields
            .iter()
            .filter_map(|rule| {
                self.sanitize_as(&rule.name, rule.sanitize_type, &rule.allowed)
                    .map(|value| (rule.name.clone(), value))
            })
            .collect();
        SanitizedForm { fields }
    }
}

// Radio values reaching this point are already known to be in the allow-list.
fn apply_rule(sanitize_type: SanitizeType, value: &str) -> SanitizedValue {
    match sanitize_type {
        SanitizeType::Text | SanitizeType::Radio => rules::sanitize_text_field(value).into(),
        SanitizeType::Email => rules::sanitize_email(value).into(),
        SanitizeType::Number => rules::sanitize_number_int(value).into(),
        SanitizeType::Url => rules::sanitize_url(value).into(),
        SanitizeType::Checkbox => rules::sanitize_checkbox(value).into(),
        SanitizeType::Textarea => rules::sanitize_textarea_field(value).into(),
        SanitizeType::Key => rules::sanitize_key(value).into(),
    }
}
