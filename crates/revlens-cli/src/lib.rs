//! # revlens-cli: Review Analysis CLI
//!
//! Provides the `revlens` command-line interface.
//!
//! ## Subcommands
//!
//! - `revlens analyze`: categorize and score a review export, print the
//!   console report and write the CSV/JSON outputs.
//! - `revlens check-config`: load and validate a taxonomy file.
//!
//! ```bash
//! revlens analyze --input input_data.tsv --config config/categories.yaml
//! revlens -v analyze --parallel --comments output/comments.csv
//! revlens check-config --config config/categories.yaml
//! ```
//!
//! Handlers return the process exit code: 0 on success, 1 on any
//! configuration or I/O error.

pub mod analyze;
pub mod check_config;
