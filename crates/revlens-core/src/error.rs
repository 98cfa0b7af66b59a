//! # Error Types
//!
//! Two channels, kept apart on purpose of control flow:
//!
//! - [`ValidationError`] is returned by constructors of domain values
//!   (identifiers, taxonomy nodes). Configuration loaders surface it as a
//!   fatal error before any record is processed.
//! - [`RecordSkip`] is not a failure of the run. It is the value the
//!   per-record validity check yields for a record that must not contribute
//!   to any aggregate.

use thiserror::Error;

/// A domain value could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Identifiers must contain at least one non-whitespace character.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// Which identifier type was being built.
        kind: &'static str,
    },

    /// Category weights must be finite and non-negative.
    #[error("invalid weight {weight} for category {category}")]
    InvalidWeight {
        /// The category the weight was configured for.
        category: String,
        /// The rejected value.
        weight: f64,
    },

    /// A category declared the same subcategory twice.
    #[error("duplicate subcategory {subcategory} in category {category}")]
    DuplicateSubcategory {
        /// Owning category.
        category: String,
        /// Repeated subcategory identifier.
        subcategory: String,
    },

    /// The taxonomy declared the same category twice.
    #[error("duplicate category {0}")]
    DuplicateCategory(String),
}

/// Why a review record was excluded from aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordSkip {
    /// Content is missing, empty, or whitespace only.
    #[error("review content is empty")]
    EmptyContent,

    /// The rating column is absent or blank.
    #[error("rating is missing")]
    MissingRating,

    /// The rating is present but is not an integer.
    #[error("rating {0:?} is not an integer")]
    InvalidRating(String),
}
