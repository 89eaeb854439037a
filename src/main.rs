//! trafficshape - analytics export normalizer
//!
//! One-shot batch transform: reads a web-traffic CSV with inconsistent column
//! naming, rewrites it against the canonical reporting schema, and derives a
//! conversion-rate column before writing the result back out.

mod data;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "trafficshape")]
#[command(about = "Normalize an analytics CSV export into the canonical reporting schema")]
struct Cli {
    /// Raw export to read
    input: PathBuf,
    /// Where the normalized CSV is written
    output: PathBuf,
    /// Column name given to the key-events metric in the output
    key_events_name: String,
}

fn run(cli: &Cli) -> Result<()> {
    let mut df = data::read_table(&cli.input)?;
    info!(
        rows = df.height(),
        cols = df.width(),
        input = %cli.input.display(),
        "loaded export"
    );
    pipeline::process(&mut df, &cli.key_events_name)?;
    data::write_table(&mut df, &cli.output)?;
    info!(output = %cli.output.display(), "wrote normalized table");
    Ok(())
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // usage goes to the error stream for bad invocations; exit 1 either way
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error processing CSV: {err}");
            ExitCode::from(1)
        }
    }
}
