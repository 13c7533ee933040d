//! reqif-tools: Tolerant ReqIF parsing and structural diff tool.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reqif_tools::cli::{self, OutputFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reqif-tools")]
#[command(version)]
#[command(about = "Tolerant ReqIF parsing and structural diff tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success / no changes detected
    1  Changes detected (diff with --fail-on-change)

EXAMPLES:
    # Inspect a document and its parse diagnostics
    reqif-tools parse requirements.reqif

    # Compare two baselines, machine-readable output
    reqif-tools diff baseline.reqif revised.reqifz --json

    # CI gate: fail when the requirement set changed
    reqif-tools diff baseline.reqif revised.reqif --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .reqif document or .reqifz bundle and report diagnostics
    Parse {
        /// Path to the document or bundle
        file: PathBuf,

        /// Emit the full parse output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two documents or bundles
    Diff {
        /// Path to the baseline document
        baseline: PathBuf,

        /// Path to the revised document
        revised: PathBuf,

        /// Emit the full diff result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with code 1 when any change is detected
        #[arg(long)]
        fail_on_change: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let exit_code = match cli.command {
        Commands::Parse { file, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Summary
            };
            cli::run_parse(&file, format)?
        }
        Commands::Diff {
            baseline,
            revised,
            json,
            fail_on_change,
        } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Summary
            };
            cli::run_diff(&baseline, &revised, format, fail_on_change)?
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
