//! # revlens CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use revlens_cli::analyze::{run_analyze, AnalyzeArgs};
use revlens_cli::check_config::{run_check_config, CheckConfigArgs};

/// revlens: keyword-taxonomy analysis of app store reviews.
///
/// Buckets reviews into categories and subcategories, scores them with a
/// negation-aware sentiment lexicon and reports per-category satisfaction.
#[derive(Parser, Debug)]
#[command(name = "revlens", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a review export and write reports.
    Analyze(AnalyzeArgs),

    /// Load and validate a taxonomy file.
    CheckConfig(CheckConfigArgs),
}

/// `analyze` reports progress at `info`, so it logs at that level unless
/// `--quiet` is given.
fn log_level(cli: &Cli) -> &'static str {
    match cli.verbose {
        0 => match &cli.command {
            Commands::Analyze(args) if !args.quiet => "info",
            _ => "warn",
        },
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::new(log_level(&cli));

    // Logs go to stderr; stdout carries the report.
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "revlens starting");

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::CheckConfig(args) => run_check_config(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
