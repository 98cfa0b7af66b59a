//! # CSV Sinks
//!
//! Two tables, both with a header row and display names rather than ids:
//!
//! - **Summary**: `category, subcategory, comment_count, average_score,
//!   satisfaction_score`. One [`TOTAL_LABEL`] row per category, followed by
//!   its subcategories that collected at least one comment. Scores are
//!   written with two decimals.
//! - **Comments**: `category, subcategory, rating, text`. Category-level
//!   comments are labelled [`TOTAL_LABEL`], then each subcategory's.
//!
//! The `write_*_csv` functions create missing parent directories.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use revlens_engine::{AccumulatorStats, AnalysisResults};

use crate::error::ReportResult;

/// Subcategory column value of category-level rows.
pub const TOTAL_LABEL: &str = "(total)";

#[derive(Serialize)]
struct SummaryRow<'a> {
    category: &'a str,
    subcategory: &'a str,
    comment_count: u64,
    average_score: String,
    satisfaction_score: String,
}

impl<'a> SummaryRow<'a> {
    fn new(category: &'a str, subcategory: &'a str, stats: &AccumulatorStats) -> Self {
        Self {
            category,
            subcategory,
            comment_count: stats.comment_count,
            average_score: format!("{:.2}", stats.average_score),
            satisfaction_score: format!("{:.2}", stats.satisfaction_score),
        }
    }
}

#[derive(Serialize)]
struct CommentRow<'a> {
    category: &'a str,
    subcategory: &'a str,
    rating: i64,
    text: &'a str,
}

/// Write the summary table to `writer`.
pub fn write_summary<W: Write>(writer: W, results: &AnalysisResults) -> ReportResult<()> {
    let mut out = headerless(writer);
    out.write_record([
        "category",
        "subcategory",
        "comment_count",
        "average_score",
        "satisfaction_score",
    ])?;
    for cat in &results.categories {
        out.serialize(SummaryRow::new(&cat.name, TOTAL_LABEL, &cat.stats))?;
        for sub in cat.subcategories.iter().filter(|s| s.stats.comment_count > 0) {
            out.serialize(SummaryRow::new(&cat.name, &sub.name, &sub.stats))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write the comment listing to `writer`.
pub fn write_comments<W: Write>(writer: W, results: &AnalysisResults) -> ReportResult<()> {
    let mut out = headerless(writer);
    out.write_record(["category", "subcategory", "rating", "text"])?;
    let mut rows = 0usize;
    for cat in &results.categories {
        let groups = std::iter::once((TOTAL_LABEL, &cat.stats))
            .chain(cat.subcategories.iter().map(|s| (s.name.as_str(), &s.stats)));
        for (subcategory, stats) in groups {
            for comment in &stats.comments {
                out.serialize(CommentRow {
                    category: &cat.name,
                    subcategory,
                    rating: comment.rating,
                    text: &comment.text,
                })?;
                rows += 1;
            }
        }
    }
    out.flush()?;
    tracing::debug!(rows, "comment listing written");
    Ok(())
}

/// Write the summary table to a file.
pub fn write_summary_csv(path: &Path, results: &AnalysisResults) -> ReportResult<()> {
    write_summary(create(path)?, results)?;
    tracing::info!(path = %path.display(), "summary CSV written");
    Ok(())
}

/// Write the comment listing to a file.
pub fn write_comments_csv(path: &Path, results: &AnalysisResults) -> ReportResult<()> {
    write_comments(create(path)?, results)?;
    tracing::info!(path = %path.display(), "comment CSV written");
    Ok(())
}

// Headers are written explicitly so that empty tables still carry them.
fn headerless<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

pub(crate) fn create(path: &Path) -> ReportResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revlens_core::{Category, CategoryId, RawReviewRecord, SentimentLexicon, Subcategory, SubcategoryId, Taxonomy};
    use revlens_engine::{Engine, NoopObserver, WhitespaceTokenizer};
    use std::sync::Arc;

    fn results() -> AnalysisResults {
        let mechanics = Category::new(
            CategoryId::new("mechanics").unwrap(),
            "Mechanics",
            vec![
                Subcategory::new(SubcategoryId::new("combat").unwrap(), "Combat", ["battle"]),
                Subcategory::new(SubcategoryId::new("controls").unwrap(), "Controls", ["controls"]),
            ],
        )
        .unwrap();
        Engine::new(Taxonomy::new(vec![mechanics]).unwrap(), SentimentLexicon::default())
            .with_tokenizer(WhitespaceTokenizer)
            .with_observer(Arc::new(NoopObserver))
            .run(vec![
                RawReviewRecord::new("r1", "battle, with \"quotes\"", "5"),
                RawReviewRecord::new("r2", "battle again", "2"),
            ])
            .results
    }

    #[test]
    fn summary_has_total_row_and_active_subcategories() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &results()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "category,subcategory,comment_count,average_score,satisfaction_score",
                "Mechanics,(total),2,3.50,3.50",
                "Mechanics,Combat,2,3.50,3.50",
            ]
        );
    }

    #[test]
    fn comments_listing_quotes_text() {
        let mut buf = Vec::new();
        write_comments(&mut buf, &results()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "category,subcategory,rating,text");
        assert_eq!(lines[1], "Mechanics,(total),5,\"battle, with \"\"quotes\"\"\"");
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("Mechanics,Combat,5,"));
    }

    #[test]
    fn empty_results_still_have_headers() {
        let empty = AnalysisResults { categories: vec![] };
        let mut buf = Vec::new();
        write_summary(&mut buf, &empty).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "category,subcategory,comment_count,average_score,satisfaction_score\n"
        );
    }

    #[test]
    fn file_writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("result.csv");
        write_summary_csv(&path, &results()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("category,"));
    }
}
