//! Engine error types.

use thiserror::Error;

use revlens_core::RecordSkip;

/// The tokenizer could not process a text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("tokenization failed: {message}")]
pub struct TokenizeError {
    pub message: String,
}

impl TokenizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by the aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A categorization referenced a category with no accumulator.
    #[error("unknown category {0}")]
    UnknownCategory(String),

    /// A categorization referenced a subcategory with no accumulator.
    #[error("unknown subcategory {subcategory} in category {category}")]
    UnknownSubcategory {
        category: String,
        subcategory: String,
    },
}

/// Why a single record did not reach the aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordFailure {
    /// The record failed the validity check.
    #[error("skipped: {0}")]
    Skip(#[from] RecordSkip),

    /// Anything else that went wrong while processing the record.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
