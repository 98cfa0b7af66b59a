//! # Analyze Subcommand
//!
//! Load the taxonomy and the review export, run the engine, print the
//! console report and write the requested output files.
//!
//! A taxonomy file that is not valid YAML stops the run unless
//! `--fallback-builtin` is given, in which case the built-in sample
//! taxonomy is used instead. Structural errors in a well-formed file always
//! stop the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use revlens_config::{builtin_config, load_config, AnalysisConfig};
use revlens_engine::{Engine, EngineSettings};
use revlens_report::{read_reviews, write_comments_csv, write_json, write_summary_csv, ConsoleReport, JsonReport};

/// Arguments for the `revlens analyze` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Headerless TSV review export (id, date, author, content, rating).
    #[arg(long, default_value = "input_data.tsv")]
    pub input: PathBuf,

    /// YAML taxonomy file.
    #[arg(long, default_value = "config/categories.yaml")]
    pub config: PathBuf,

    /// Summary CSV output path.
    #[arg(long, default_value = "output/result.csv")]
    pub output: PathBuf,

    /// Also write a per-comment CSV listing.
    #[arg(long)]
    pub comments: Option<PathBuf>,

    /// Also write the full results as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Classify reviews on all cores.
    #[arg(long)]
    pub parallel: bool,

    /// Seconds between progress log lines (0 disables them).
    #[arg(long, default_value_t = 5)]
    pub progress_secs: u64,

    /// Keep at most N comments per category and subcategory.
    #[arg(long, value_name = "N")]
    pub max_comments: Option<usize>,

    /// Use the built-in sample taxonomy if the config file is not valid YAML.
    #[arg(long)]
    pub fallback_builtin: bool,

    /// Do not print the console report or progress lines.
    #[arg(short, long)]
    pub quiet: bool,
}

impl AnalyzeArgs {
    fn settings(&self) -> EngineSettings {
        EngineSettings {
            progress_interval: Duration::from_secs(self.progress_secs),
            max_retained_comments: self.max_comments,
            parallel: self.parallel,
        }
    }
}

/// Execute the analyze subcommand.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<u8> {
    let config = load_taxonomy(&args.config, args.fallback_builtin)?;
    let records = read_reviews(&args.input)
        .with_context(|| format!("failed to read reviews from {}", args.input.display()))?;

    tracing::info!(
        reviews = records.len(),
        categories = config.taxonomy.len(),
        positive_words = config.sentiment.positive.len(),
        negative_words = config.sentiment.negative.len(),
        "inputs loaded"
    );

    let engine = Engine::new(config.taxonomy, config.sentiment).with_settings(args.settings());
    let report = engine.analyze(records);

    if !args.quiet {
        print!("{}", ConsoleReport::new(&report.results).with_summary(&report.summary));
    }

    write_summary_csv(&args.output, &report.results)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    if let Some(path) = &args.comments {
        write_comments_csv(path, &report.results)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        write_json(path, &JsonReport::new(&report.results, Some(&report.summary)))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if !args.quiet {
        println!("results written to {}", args.output.display());
    }
    Ok(0)
}

/// Load the taxonomy, substituting the built-in one on a YAML syntax error
/// when `fallback` is set.
pub fn load_taxonomy(path: &Path, fallback: bool) -> Result<AnalysisConfig> {
    match load_config(path) {
        Ok(config) => Ok(config),
        Err(e) if fallback && e.is_syntax_error() => {
            tracing::warn!(path = %path.display(), error = %e, "taxonomy file unparsable, using built-in taxonomy");
            builtin_config().context("built-in taxonomy is invalid")
        }
        Err(e) => Err(e).with_context(|| format!("failed to load taxonomy from {}", path.display())),
    }
}
