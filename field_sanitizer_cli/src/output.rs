use field_sanitizer::{SanitizeType, SanitizedForm, SanitizedValue};
use owo_colors::colors::xterm::LightGray;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub field: String,
    pub rule: SanitizeType,
    pub value: Option<SanitizedValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    pub fields: SanitizedForm,
    pub absent: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProgramOutput {
    Field(FieldReport),
    Form(FormReport),
}

#[derive(Debug, Clone, Serialize, Deserialize, Copy)]
pub enum OutputFormatType {
    Console,
    Json,
}

impl FromStr for OutputFormatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormatType::Console),
            "json" => Ok(OutputFormatType::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub trait OutputFormat {
    fn to_console(&self) -> String;
    fn to_json(&self) -> String;

    fn to_format(&self, format: OutputFormatType) -> String {
        match format {
            OutputFormatType::Console => self.to_console(),
            OutputFormatType::Json => self.to_json(),
        }
    }
}

fn console_value(value: &SanitizedValue) -> String {
    match value {
        SanitizedValue::Text(text) => format!("{:?}", text).green().to_string(),
        SanitizedValue::Flag(flag) => flag.bold().blue().to_string(),
    }
}

impl OutputFormat for FieldReport {
    fn to_console(&self) -> String {
        match &self.value {
            Some(value) => format!(
                "{} {} {}",
                self.field.yellow(),
                format!("({})", self.rule).fg::<LightGray>(),
                console_value(value)
            ),
            None => format!(
                "{} {} {}",
                self.field.yellow(),
                format!("({})", self.rule).fg::<LightGray>(),
                "no usable value".red().italic()
            ),
        }
    }
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|error| format!("Error serializing to JSON: {}", error))
    }
}

impl OutputFormat for FormReport {
    fn to_console(&self) -> String {
        let mut result = "".to_owned();
        for (name, value) in self.fields.iter() {
            result.push_str(&format!(
                " {} {} {}\n",
                "|".bold(),
                name.yellow(),
                console_value(value)
            ));
        }
        for name in &self.absent {
            result.push_str(&format!(
                " {} {} {}\n",
                "|".bold(),
                name.yellow(),
                "no usable value".red().italic()
            ));
        }
        if result.is_empty() {
            result.push_str(&format!("{}\n", "Schema lists no fields".italic()));
        }
        result
    }
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|error| format!("Error serializing to JSON: {}", error))
    }
}

impl OutputFormat for ProgramOutput {
    fn to_console(&self) -> String {
        match self {
            ProgramOutput::Field(report) => report.to_console(),
            ProgramOutput::Form(report) => report.to_console(),
        }
    }
    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|error| format!("Error serializing to JSON: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_report_json() {
        let report = FieldReport {
            field: "agree".into(),
            rule: SanitizeType::Checkbox,
            value: Some(SanitizedValue::Flag(true)),
        };
        assert_eq!(
            report.to_format(OutputFormatType::Json),
            r#"{"field":"agree","rule":"checkbox","value":true}"#
        );
    }

    #[test]
    fn absent_field_report_json() {
        let report = FieldReport {
            field: "plan".into(),
            rule: SanitizeType::Radio,
            value: None,
        };
        assert_eq!(
            report.to_json(),
            r#"{"field":"plan","rule":"radio","value":null}"#
        );
    }

    #[test]
    fn console_mentions_field_and_value() {
        let report = FieldReport {
            field: "age".into(),
            rule: SanitizeType::Number,
            value: Some(SanitizedValue::Text("123".into())),
        };
        let console = report.to_console();
        assert!(console.contains("age"));
        assert!(console.contains("\"123\""));
        assert!(console.contains("number"));
    }

    #[test]
    fn empty_form_report_says_so() {
        let report = FormReport {
            fields: SanitizedForm::default(),
            absent: vec![],
        };
        assert!(report.to_console().contains("Schema lists no fields"));
        assert_eq!(report.to_json(), r#"{"fields":{},"absent":[]}"#);
    }

    #[test]
    fn program_output_json_is_the_report_itself() {
        let field = ProgramOutput::Field(FieldReport {
            field: "email".into(),
            rule: SanitizeType::Email,
            value: Some(SanitizedValue::Text("ann@example.com".into())),
        });
        assert_eq!(
            field.to_format(OutputFormatType::Json),
            r#"{"field":"email","rule":"email","value":"ann@example.com"}"#
        );

        let form = ProgramOutput::Form(FormReport {
            fields: SanitizedForm::default(),
            absent: vec!["plan".into()],
        });
        assert_eq!(form.to_json(), r#"{"fields":{},"absent":["plan"]}"#);
    }
}
