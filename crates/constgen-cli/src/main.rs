//! Constgen CLI entry point.
//!
//! Reads the constant schema from `constants.json` (or `constants.toml`) in
//! the current directory and writes the generated definitions to stdout:
//!
//! ```sh
//! constgen > include/dwarf_constants.h
//! constgen --target rust > src/dwarf_constants.rs
//! ```

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use rhizome_constgen_codegen::{Target, generate};
use rhizome_constgen_schema::Schema;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "constgen")]
#[command(about = "Generate constant definitions from a constant-group schema")]
#[command(version)]
struct Cli {
    /// Language to emit: cpp or rust
    #[arg(short, long, default_value_t)]
    target: Target,
}

fn main() -> ExitCode {
    // Initialize tracing; stdout carries only generated source
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("constgen=info,rhizome_constgen=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(target: Target) -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::current_dir()?;
    let schema = Schema::load_from_dir(&dir)?;
    info!(groups = schema.groups.len(), %target, "loaded schema");

    let emitter = target.emitter();
    let code = generate(&schema, emitter.as_ref())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(code.as_bytes())?;
    stdout.flush()?;
    debug!(bytes = code.len(), "wrote generated source");

    Ok(())
}
