//! # revlens-report: Record Source and Report Sinks
//!
//! The I/O edges around the engine. Nothing here influences categorization
//! or scoring.
//!
//! - **Source** (`source.rs`): headerless tab-separated review files. Rows
//!   come out as [`RawReviewRecord`](revlens_core::RawReviewRecord)s with
//!   every field still text; validity is decided by the core.
//! - **Console** (`console.rs`): human-readable text report.
//! - **CSV** (`csv_export.rs`): per-category summary table and a flat
//!   comment listing.
//! - **JSON** (`json.rs`): the full results document with a generation
//!   timestamp.

pub mod console;
pub mod csv_export;
pub mod error;
pub mod json;
pub mod source;

pub use console::ConsoleReport;
pub use csv_export::{write_comments, write_comments_csv, write_summary, write_summary_csv, TOTAL_LABEL};
pub use error::{ReportError, ReportResult};
pub use json::{write_json, JsonReport};
pub use source::{read_reviews, read_reviews_from, MIN_COLUMNS};
