//! Entry point for the macroveil CLI, a C/C++ source obfuscator.
//!
//! Reads one translation unit, replaces every nameable token with a
//! pseudorandom alias, and writes a macro-definition header followed by the
//! rewritten source. The output compiles to the same program once the
//! preprocessor expands the aliases back.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use macroveil_analysis::collect_report;
use macroveil_core::pipeline::{obfuscate_source, ObfuscationConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface for macroveil.
#[derive(Debug, Parser)]
#[command(name = "macroveil")]
#[command(about = "Macroveil: hide a translation unit's tokens behind generated macros")]
struct Cli {
    /// Path of the source file to obfuscate
    input: PathBuf,

    /// Path the transformed unit is written to
    output: PathBuf,

    /// Fixed random seed for reproducible alias assignment
    #[arg(long)]
    seed: Option<u64>,

    /// Path to emit an obfuscation report as JSON (optional)
    #[arg(long)]
    emit: Option<PathBuf>,
}

/// Runs the macroveil CLI with the provided arguments.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("macroveil: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("could not read source file '{}'", cli.input.display()))?;

    let tokens = macroveil_locator::scan(&source)?;
    tracing::debug!(
        occurrences = tokens.len(),
        seed = ?cli.seed,
        "starting obfuscation"
    );
    let config = ObfuscationConfig { seed: cli.seed };
    let result = obfuscate_source(&source, tokens, &config)?;

    fs::write(&cli.output, &result.output)
        .with_context(|| format!("could not write output file '{}'", cli.output.display()))?;

    if let Some(path) = &cli.emit {
        let report = collect_report(&result.symbols, source.len(), result.output.len(), cli.seed);
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("could not write report file '{}'", path.display()))?;
        println!("Wrote obfuscation report to {}", path.display());
    }

    println!(
        "Obfuscation complete: {} symbols, {} occurrences rewritten",
        result.symbols.symbol_count(),
        result.symbols.occurrence_count()
    );
    println!(
        "Size change: {} -> {} bytes",
        source.len(),
        result.output.len()
    );
    Ok(())
}
