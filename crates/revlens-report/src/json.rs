//! JSON results document.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use revlens_engine::{AnalysisResults, RunSummary};

use crate::csv_export::create;
use crate::error::ReportResult;

/// The serialized shape of a JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a RunSummary>,
    pub results: &'a AnalysisResults,
}

impl<'a> JsonReport<'a> {
    /// A report stamped with the current time.
    pub fn new(results: &'a AnalysisResults, summary: Option<&'a RunSummary>) -> Self {
        Self {
            generated_at: Utc::now(),
            summary,
            results,
        }
    }

    /// Pretty-printed JSON to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> ReportResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Write a pretty-printed JSON report to a file.
pub fn write_json(path: &Path, report: &JsonReport<'_>) -> ReportResult<()> {
    let mut file = create(path)?;
    report.write_to(&mut file)?;
    file.write_all(b"\n")?;
    tracing::info!(path = %path.display(), "JSON report written");
    Ok(())
}
