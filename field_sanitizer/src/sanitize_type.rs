use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{event, Level};

use crate::Error;

/// The sanitization rule applied to a submitted field.
///
/// The set is closed. Tags are matched exactly (`"email"`, not `"Email"`); see
/// [`SanitizeType::from_tag`] for how unrecognized tags are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum SanitizeType {
    /// Single-line plain text. Also used for unrecognized tags.
    #[default]
    Text,
    /// Email address; invalid input becomes an empty string.
    Email,
    /// Signed integer: digits with at most one leading sign.
    Number,
    /// Absolute or relative URL with an allowed scheme.
    Url,
    /// Boolean coercion.
    Checkbox,
    /// Multi-line plain text.
    Textarea,
    /// Lowercase identifier of `[a-z0-9_-]`.
    Key,
    /// Text restricted to an allow-list.
    Radio,
}

impl SanitizeType {
    /// Every rule, in tag order.
    pub const ALL: [SanitizeType; 8] = [
        SanitizeType::Text,
        SanitizeType::Email,
        SanitizeType::Number,
        SanitizeType::Url,
        SanitizeType::Checkbox,
        SanitizeType::Textarea,
        SanitizeType::Key,
        SanitizeType::Radio,
    ];

    /// Resolves a sanitize-type tag. Any tag outside the closed set falls back to
    /// [`SanitizeType::Text`].
    pub fn from_tag(tag: &str) -> Self {
        Self::recognize(tag).unwrap_or_else(|| {
            event!(
                Level::DEBUG,
                tag,
                "Unrecognized sanitize type, falling back to text"
            );
            SanitizeType::Text
        })
    }

    /// The tag naming this rule.
    pub fn as_tag(self) -> &'static str {
        match self {
            SanitizeType::Text => "text",
            SanitizeType::Email => "email",
            SanitizeType::Number => "number",
            SanitizeType::Url => "url",
            SanitizeType::Checkbox => "checkbox",
            SanitizeType::Textarea => "textarea",
            SanitizeType::Key => "key",
            SanitizeType::Radio => "radio",
        }
    }

    /// Returns true if the rule produces a boolean instead of text.
    pub fn yields_flag(self) -> bool {
        matches!(self, SanitizeType::Checkbox)
    }

    fn recognize(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_tag() == tag)
    }
}

/// Strict parsing: unrecognized tags are an error instead of falling back to text.
impl FromStr for SanitizeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| Error::UnknownSanitizeType(s.to_owned()))
    }
}

impl From<String> for SanitizeType {
    fn from(tag: String) -> Self {
        SanitizeType::from_tag(&tag)
    }
}

impl From<&str> for SanitizeType {
    fn from(tag: &str) -> Self {
        SanitizeType::from_tag(tag)
    }
}

impl fmt::Display for SanitizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for SanitizeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}
