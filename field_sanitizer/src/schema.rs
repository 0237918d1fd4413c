use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::{Result, SanitizeType};

/// How one field of a form is sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Name of the submitted field.
    pub name: String,
    /// The rule to apply; `text` if omitted or unrecognized.
    #[serde(rename = "type", default)]
    pub sanitize_type: SanitizeType,
    /// Accepted values for `radio` fields.
    #[serde(default)]
    pub allowed: Vec<String>,
}

impl FieldRule {
    /// Creates a rule without an allow-list.
    pub fn new(name: impl Into<String>, sanitize_type: SanitizeType) -> Self {
        FieldRule {
            name: name.into(),
            sanitize_type,
            allowed: Vec::new(),
        }
    }

    /// Creates a `radio` rule accepting `allowed`.
    pub fn radio<I, V>(name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        FieldRule {
            name: name.into(),
            sanitize_type: SanitizeType::Radio,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

/// The fields of a form and the rule for each of them.
///
/// Schemas are usually kept next to the application configuration:
///
/// ```toml
/// [[fields]]
/// name = "email"
/// type = "email"
///
/// [[fields]]
/// name = "plan"
/// type = "radio"
/// allowed = ["silver", "gold", "bronze"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Field rules in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

impl FormSchema {
    /// Creates a schema from field rules.
    pub fn new(fields: Vec<FieldRule>) -> Self {
        FormSchema { fields }
    }

    /// Loads a schema file. The format (TOML, JSON, YAML, ...) is picked from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let schema = Self::load(Config::builder().add_source(File::from(path)))?;
        event!(
            Level::DEBUG,
            path = %path.display(),
            fields = schema.fields.len(),
            "Form schema loaded"
        );
        Ok(schema)
    }

    /// Parses a schema from a string in the given format.
    pub fn from_str_with_format(text: &str, format: FileFormat) -> Result<Self> {
        Self::load(Config::builder().add_source(File::from_str(text, format)))
    }

    /// Parses a TOML schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        Self::from_str_with_format(text, FileFormat::Toml)
    }

    /// Returns the rule for `name`.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }

    fn load(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}

impl FromIterator<FieldRule> for FormSchema {
    fn from_iter<I: IntoIterator<Item = FieldRule>>(iter: I) -> Self {
        FormSchema::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SIGNUP: &str = r#"
        [[fields]]
        name = "email"
        type = "email"

        [[fields]]
        name = "plan"
        type = "radio"
        allowed = ["silver", "gold"]

        [[fields]]
        name = "nickname"
    "#;

    #[test]
    fn toml_schema_is_parsed() {
        let schema = FormSchema::from_toml(SIGNUP).unwrap();
        assert_eq!(
            schema,
            FormSchema::new(vec![
                FieldRule::new("email", SanitizeType::Email),
                FieldRule::radio("plan", ["silver", "gold"]),
                FieldRule::new("nickname", SanitizeType::Text),
            ])
        );
        assert_eq!(
            schema.field("plan").map(|rule| rule.sanitize_type),
            Some(SanitizeType::Radio)
        );
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn unknown_type_falls_back_to_text() {
        let schema = FormSchema::from_toml(
            r#"
            [[fields]]
            name = "color"
            type = "select"
            "#,
        )
        .unwrap();
        assert_eq!(schema.fields[0].sanitize_type, SanitizeType::Text);
    }

    #[test]
    fn empty_schema_has_no_fields() {
        assert!(FormSchema::from_toml("").unwrap().fields.is_empty());
    }

    #[test]
    fn json_schema_file_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"fields": [{{"name": "agree", "type": "checkbox"}}]}}"#
        )
        .unwrap();

        let schema = FormSchema::from_file(file.path()).unwrap();
        assert_eq!(
            schema.fields,
            vec![FieldRule::new("agree", SanitizeType::Checkbox)]
        );
    }

    #[test]
    fn missing_file_is_a_schema_error() {
        let error = FormSchema::from_file("/nonexistent/schema.toml").unwrap_err();
        assert!(matches!(error, crate::Error::Schema(_)));
    }
}
