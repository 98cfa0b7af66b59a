//! # TSV Record Source
//!
//! Reads headerless tab-separated review exports. Columns, in order:
//!
//! | # | column  |
//! |---|---------|
//! | 0 | id      |
//! | 1 | date    |
//! | 2 | author  |
//! | 3 | content |
//! | 4 | rating  |
//!
//! Extra columns are ignored. Rows may be ragged: a short row yields missing
//! fields, which the core validity check then rejects. The file as a whole
//! must have at least one row with all five columns. Quoting follows CSV
//! rules, so a quoted content field may contain tabs and newlines.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use revlens_core::RawReviewRecord;

use crate::error::{ReportError, ReportResult};

/// Columns every input must provide.
pub const MIN_COLUMNS: usize = 5;

const ID: usize = 0;
const DATE: usize = 1;
const AUTHOR: usize = 2;
const CONTENT: usize = 3;
const RATING: usize = 4;

/// Read every review row of the file at `path`.
///
/// # Errors
///
/// [`ReportError::FileNotFound`] if the file is absent,
/// [`ReportError::TooFewColumns`] if no row has five columns, and
/// [`ReportError::Csv`] for malformed quoting or non-UTF-8 content.
pub fn read_reviews(path: &Path) -> ReportResult<Vec<RawReviewRecord>> {
    if !path.exists() {
        return Err(ReportError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let records = read_reviews_from(file, &path.display().to_string())?;
    tracing::info!(path = %path.display(), records = records.len(), "reviews loaded");
    Ok(records)
}

/// Read review rows from any reader. `source_name` labels errors.
pub fn read_reviews_from<R: Read>(reader: R, source_name: &str) -> ReportResult<Vec<RawReviewRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut widest = 0;
    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let fields = result?;
        widest = widest.max(fields.len());
        if fields.len() < MIN_COLUMNS {
            tracing::debug!(row = row + 1, columns = fields.len(), "short row");
        }
        records.push(to_raw(row, &fields));
    }

    if widest < MIN_COLUMNS {
        return Err(ReportError::TooFewColumns {
            source_name: source_name.to_string(),
            found: widest,
            required: MIN_COLUMNS,
        });
    }
    Ok(records)
}

fn to_raw(row: usize, fields: &csv::StringRecord) -> RawReviewRecord {
    let field = |i: usize| fields.get(i).filter(|v| !v.is_empty()).map(str::to_string);
    RawReviewRecord {
        // Rows without an id are labelled by 1-based line position.
        id: field(ID).unwrap_or_else(|| format!("row-{}", row + 1)),
        date: field(DATE),
        author: field(AUTHOR),
        content: field(CONTENT),
        rating: field(RATING),
    }
}
