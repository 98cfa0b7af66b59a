//! # Check-Config Subcommand
//!
//! Load a taxonomy file through the same path `analyze` uses and print
//! what it contains.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use revlens_config::{load_config, AnalysisConfig};

/// Arguments for the `revlens check-config` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckConfigArgs {
    /// YAML taxonomy file.
    #[arg(long, default_value = "config/categories.yaml")]
    pub config: PathBuf,
}

/// Execute the check-config subcommand.
pub fn run_check_config(args: &CheckConfigArgs) -> Result<u8> {
    let config = load_config(&args.config)
        .with_context(|| format!("invalid taxonomy {}", args.config.display()))?;
    print!("{}", describe(&config));
    println!("OK: {}", args.config.display());
    Ok(0)
}

fn describe(config: &AnalysisConfig) -> String {
    let taxonomy = &config.taxonomy;
    let mut out = format!(
        "categories: {}, subcategories: {}, keywords: {}\n",
        taxonomy.len(),
        taxonomy.subcategory_count(),
        taxonomy.keyword_count()
    );
    for cat in taxonomy.categories() {
        out.push_str(&format!(
            "  {} ({}) weight {:.2}, {} subcategories\n",
            cat.id(),
            cat.name(),
            cat.weight(),
            cat.subcategories().len()
        ));
    }
    out.push_str(&format!(
        "sentiment words: {} positive, {} negative; negation patterns: {}\n",
        config.sentiment.positive.len(),
        config.sentiment.negative.len(),
        config.sentiment.negation_patterns.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_builtin_taxonomy() {
        let config = revlens_config::builtin_config().unwrap();
        let text = describe(&config);
        assert!(text.starts_with("categories: 2,"));
        assert!(text.contains("game_mechanics"));
        assert!(text.contains("negation patterns: 3"));
    }

    #[test]
    fn invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.yaml");
        std::fs::write(&path, "negation_patterns: []\n").unwrap();
        let err = run_check_config(&CheckConfigArgs { config: path }).unwrap_err();
        assert!(format!("{err:#}").contains("categories"));
    }
}
