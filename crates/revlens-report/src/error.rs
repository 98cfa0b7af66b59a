//! Report and record source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading reviews or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input file does not exist.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No row of the input has the five required columns.
    #[error("{source_name} has {found} column(s), at least {required} required")]
    TooFewColumns {
        source_name: String,
        found: usize,
        required: usize,
    },

    /// Malformed delimited data, or a write failure in the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for the report crate.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_columns_display() {
        let err = ReportError::TooFewColumns {
            source_name: "input_data.tsv".into(),
            found: 3,
            required: 5,
        };
        assert_eq!(
            err.to_string(),
            "input_data.tsv has 3 column(s), at least 5 required"
        );
    }

    #[test]
    fn io_error_converts() {
        let err = ReportError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
