pub mod args;
pub mod input;
pub mod output;

use anyhow::Context;
use args::Args;
use field_sanitizer::{FieldSanitizer, FormBody, FormSchema, SanitizeType};
use output::{FieldReport, FormReport, ProgramOutput};
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

/// Installs a subscriber when `FIELD_SANITIZER_LOG` holds a filter.
pub fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("FIELD_SANITIZER_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .init();
    }
}

pub fn run(args: &Args) -> anyhow::Result<ProgramOutput> {
    let raw = input::read_body(args.body.as_deref())?;
    let body = input::decode_body(&raw, args.input_format)?;
    event!(Level::DEBUG, fields = body.len(), "Body decoded");
    sanitize_body(args, &body)
}

pub fn sanitize_body(args: &Args, body: &FormBody) -> anyhow::Result<ProgramOutput> {
    let sanitizer = FieldSanitizer::new(body);

    if let Some(path) = &args.schema {
        let schema = FormSchema::from_file(path)
            .with_context(|| format!("Cannot use schema {}", path.display()))?;
        let fields = sanitizer.sanitize_form(&schema);
        let absent = schema
            .fields
            .iter()
            .filter(|rule| fields.get(&rule.name).is_none())
            .map(|rule| rule.name.clone())
            .collect();
        return Ok(ProgramOutput::Form(FormReport { fields, absent }));
    }

    let field = args
        .field
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Either --field or --schema is required"))?;
    let allowed: Vec<&str> = args.allowed.iter().map(String::as_str).collect();

    Ok(ProgramOutput::Field(FieldReport {
        field: field.to_owned(),
        rule: SanitizeType::from_tag(&args.sanitize_type),
        value: sanitizer.sanitize(field, &args.sanitize_type, &allowed),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use field_sanitizer::SanitizedValue;
    use output::OutputFormat;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("field-sanitize").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn single_field_from_body_file() {
        let mut body = tempfile::NamedTempFile::new().unwrap();
        body.write_all(b"plan=gold").unwrap();
        let path = body.path().to_str().unwrap();

        let output = run(&args(&[
            "-b", path, "-f", "plan", "-t", "radio", "-a", "silver", "-a", "gold",
        ]))
        .unwrap();
        match output {
            ProgramOutput::Field(report) => {
                assert_eq!(report.rule, SanitizeType::Radio);
                assert_eq!(report.value, Some(SanitizedValue::Text("gold".into())));
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_reported_as_text() {
        let body = FormBody::parse(b"color=%3Cb%3Ered%3C%2Fb%3E");
        let output = sanitize_body(&args(&["-f", "color", "-t", "dropdown"]), &body).unwrap();
        assert_eq!(
            output.to_json(),
            r#"{"field":"color","rule":"text","value":"red"}"#
        );
    }

    #[test]
    fn schema_reports_absent_fields() {
        let mut schema = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        schema
            .write_all(
                br#"
                [[fields]]
                name = "age"
                type = "number"

                [[fields]]
                name = "agree"
                type = "checkbox"
                "#,
            )
            .unwrap();
        let path = schema.path().to_str().unwrap();

        let body = FormBody::parse(b"age=abc123");
        let output = sanitize_body(&args(&["--schema", path]), &body).unwrap();
        assert_eq!(
            output.to_json(),
            r#"{"fields":{"age":"123"},"absent":["agree"]}"#
        );
    }

    #[test]
    fn missing_schema_file_is_an_error() {
        let body = FormBody::new();
        let result = sanitize_body(&args(&["--schema", "/nonexistent/schema.toml"]), &body);
        assert!(result.is_err());
    }
}
