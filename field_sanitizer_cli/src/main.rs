use clap::Parser;
use field_sanitizer_cli::args::Args;
use field_sanitizer_cli::output::OutputFormat;
use field_sanitizer_cli::{init_tracing, run};

pub fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let output = run(&args)?;

    println!("{}", output.to_format(args.output_format));
    Ok(())
}
