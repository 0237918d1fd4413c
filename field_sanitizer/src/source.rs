use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::Value;
use tracing::{event, Level};

use crate::{Error, Result, UntrustedValue};

/// Read-only access to the raw fields of a submitted form.
///
/// The source is owned by whatever decoded the request; the sanitizer only reads from it.
/// Every value is handed out as an [`UntrustedValue`] so it cannot be used before a rule
/// has cleaned it.
pub trait RawFieldSource {
    /// Returns the raw value of `name`, or `None` if the field was not submitted.
    fn raw_field(&self, name: &str) -> Option<UntrustedValue<&str>>;

    /// Returns true if `name` was submitted, even with an empty value.
    fn contains_field(&self, name: &str) -> bool {
        self.raw_field(name).is_some()
    }
}

impl<T: RawFieldSource + ?Sized> RawFieldSource for &T {
    fn raw_field(&self, name: &str) -> Option<UntrustedValue<&str>> {
        (**self).raw_field(name)
    }
}

impl<S: BuildHasher> RawFieldSource for HashMap<String, String, S> {
    fn raw_field(&self, name: &str) -> Option<UntrustedValue<&str>> {
        self.get(name).map(|value| UntrustedValue::from(value.as_str()))
    }
}

impl RawFieldSource for BTreeMap<String, String> {
    fn raw_field(&self, name: &str) -> Option<UntrustedValue<&str>> {
        self.get(name).map(|value| UntrustedValue::from(value.as_str()))
    }
}

/// A decoded request body: field names with their raw values, in submission order.
///
/// When a name is submitted more than once, lookups return the last occurrence.
#[derive(Clone, Default)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    /// Creates an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// Percent escapes and `+` are decoded; invalid UTF-8 is replaced.
    pub fn parse(body: &[u8]) -> Self {
        url::form_urlencoded::parse(body)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// Decodes a JSON object body.
    ///
    /// Strings are kept as submitted, numbers and booleans are converted to their JSON text.
    /// `null`, arrays and nested objects have no single raw string and are treated as not
    /// submitted.
    pub fn from_json(body: &str) -> Result<Self> {
        let object = match serde_json::from_str::<Value>(body)? {
            Value::Object(object) => object,
            other => return Err(Error::JsonNotObject(json_kind(&other))),
        };

        let mut fields = Vec::with_capacity(object.len());
        for (name, value) in object {
            let raw = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                other => {
                    event!(
                        Level::DEBUG,
                        field = name.as_str(),
                        kind = json_kind(&other),
                        "Skipping JSON field without a scalar value"
                    );
                    continue;
                }
            };
            fields.push((name, raw));
        }
        Ok(FormBody { fields })
    }

    /// Appends a field. A later push of the same name shadows earlier ones.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Number of submitted pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Submitted field names in order, duplicates included.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl RawFieldSource for FormBody {
    fn raw_field(&self, name: &str) -> Option<UntrustedValue<&str>> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| UntrustedValue::from(value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormBody {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormBody {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SanitizeWith;
    use std::convert::Infallible;

    fn read(source: &impl RawFieldSource, name: &str) -> Option<String> {
        source.raw_field(name).map(|raw| {
            raw.sanitize_with(|value| Ok::<_, Infallible>(value.to_owned()))
                .unwrap_or_else(|never| match never {})
        })
    }

    #[test]
    fn urlencoded_body_is_decoded() {
        let body = FormBody::parse(b"name=Jane+Doe&email=jane%40example.com&empty=");
        assert_eq!(read(&body, "name").as_deref(), Some("Jane Doe"));
        assert_eq!(read(&body, "email").as_deref(), Some("jane@example.com"));
        assert_eq!(read(&body, "empty").as_deref(), Some(""));
        assert_eq!(read(&body, "missing"), None);
        assert!(body.contains_field("empty"));
        assert!(!body.contains_field("missing"));
    }

    #[test]
    fn last_duplicate_wins() {
        let body = FormBody::parse(b"plan=silver&plan=gold");
        assert_eq!(body.len(), 2);
        assert_eq!(read(&body, "plan").as_deref(), Some("gold"));
    }

    #[test]
    fn pushed_fields_shadow_earlier_ones() {
        let mut body = FormBody::new();
        assert!(body.is_empty());
        body.push("plan", "silver");
        body.push("agree", "1");
        body.push("plan", "gold");
        assert_eq!(body.field_names().collect::<Vec<_>>(), ["plan", "agree", "plan"]);
        assert_eq!(read(&body, "plan").as_deref(), Some("gold"));
    }

    #[test]
    fn json_scalars_become_raw_strings() {
        let body = FormBody::from_json(
            r#"{"age": 42, "agree": true, "name": "Ann", "tags": ["a"], "note": null}"#,
        )
        .unwrap();
        assert_eq!(read(&body, "age").as_deref(), Some("42"));
        assert_eq!(read(&body, "agree").as_deref(), Some("true"));
        assert_eq!(read(&body, "name").as_deref(), Some("Ann"));
        assert_eq!(read(&body, "tags"), None);
        assert_eq!(read(&body, "note"), None);
    }

    #[test]
    fn json_body_must_be_object() {
        assert!(matches!(
            FormBody::from_json("[1, 2]"),
            Err(Error::JsonNotObject("an array"))
        ));
        assert!(matches!(
            FormBody::from_json("{not json"),
            Err(Error::JsonBody(_))
        ));
    }

    #[test]
    fn maps_and_references_are_sources() {
        let mut map = HashMap::new();
        map.insert("agree".to_owned(), "1".to_owned());
        assert_eq!(read(&map, "agree").as_deref(), Some("1"));
        assert_eq!(read(&&map, "agree").as_deref(), Some("1"));

        let tree: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(read(&tree, "agree"), None);
    }
}
