use anyhow::Context;
use field_sanitizer::FormBody;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Copy)]
pub enum InputFormat {
    Form,
    Json,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "form" => Ok(InputFormat::Form),
            "json" => Ok(InputFormat::Json),
            _ => Err(format!("Unknown input format: {}", s)),
        }
    }
}

/// Reads the raw body from `path`, or from stdin.
pub fn read_body(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read body from {}", path.display())),
        None => {
            let mut body = Vec::new();
            std::io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read body from stdin")?;
            Ok(body)
        }
    }
}

pub fn decode_body(body: &[u8], format: InputFormat) -> anyhow::Result<FormBody> {
    match format {
        InputFormat::Form => Ok(FormBody::parse(trim_line_end(body))),
        InputFormat::Json => {
            let text = std::str::from_utf8(body).context("JSON body is not UTF-8")?;
            Ok(FormBody::from_json(text)?)
        }
    }
}

// Bodies written by hand or piped from echo end with a newline that is not part of the last value.
fn trim_line_end(body: &[u8]) -> &[u8] {
    let end = body
        .iter()
        .rposition(|byte| !matches!(byte, b'\n' | b'\r'))
        .map_or(0, |last| last + 1);
    &body[..end]
}
