//! Human-readable text report.

use std::fmt;

use revlens_engine::{AnalysisResults, RunSummary};

/// Renders results as indented text through [`fmt::Display`].
///
/// Every category is listed, including empty ones. Subcategories are listed
/// only when they collected at least one comment. Scores use two decimals.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReport<'a> {
    results: &'a AnalysisResults,
    summary: Option<&'a RunSummary>,
}

impl<'a> ConsoleReport<'a> {
    pub fn new(results: &'a AnalysisResults) -> Self {
        Self {
            results,
            summary: None,
        }
    }

    /// Append a run summary footer.
    pub fn with_summary(mut self, summary: &'a RunSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Review Analysis Results =====")?;
        writeln!(f)?;

        for cat in &self.results.categories {
            writeln!(f, "■ {}", cat.name)?;
            writeln!(f, "  comments: {}", cat.stats.comment_count)?;
            writeln!(f, "  average score: {:.2}", cat.stats.average_score)?;
            writeln!(f, "  satisfaction score: {:.2}", cat.stats.satisfaction_score)?;

            let mut active = cat
                .subcategories
                .iter()
                .filter(|s| s.stats.comment_count > 0)
                .peekable();
            if active.peek().is_some() {
                writeln!(f, "  subcategories:")?;
                for sub in active {
                    writeln!(f, "    ・{}", sub.name)?;
                    writeln!(f, "      comments: {}", sub.stats.comment_count)?;
                    writeln!(f, "      average score: {:.2}", sub.stats.average_score)?;
                    writeln!(f, "      satisfaction score: {:.2}", sub.stats.satisfaction_score)?;
                }
            }
            writeln!(f)?;
        }

        if let Some(summary) = self.summary {
            write!(
                f,
                "{} of {} reviews analyzed ({} skipped, {} failed) in {:.1}s ({:.1} reviews/s)",
                summary.processed,
                summary.total,
                summary.skipped,
                summary.failed,
                summary.elapsed.as_secs_f64(),
                summary.throughput
            )?;
            if summary.cancelled {
                write!(f, ", cancelled")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
