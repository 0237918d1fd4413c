use crate::input::InputFormat;
use crate::output::OutputFormatType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "field-sanitize", version, about, long_about = None)]
pub struct Args {
    /// File holding the request body, stdin if omitted
    #[arg(short, long)]
    pub body: Option<PathBuf>,
    /// Encoding of the body: form (urlencoded) or json
    #[arg(long, default_value = "form")]
    pub input_format: InputFormat,
    /// Field to sanitize
    #[arg(short, long, conflicts_with = "schema", required_unless_present = "schema")]
    pub field: Option<String>,
    /// Sanitize type tag, unknown tags behave like text
    #[arg(short = 't', long = "type", default_value = "text")]
    pub sanitize_type: String,
    /// Allowed value of a radio field, repeatable
    #[arg(short, long)]
    pub allowed: Vec<String>,
    /// Form schema file (toml, json, yaml) sanitizing every listed field
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub output_format: OutputFormatType,
}
