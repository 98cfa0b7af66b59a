//! # Review Records
//!
//! A record source produces [`RawReviewRecord`]s: every column is text and
//! any of them may be absent. [`RawReviewRecord::validate`] turns one into a
//! [`ReviewRecord`] or yields the [`RecordSkip`] reason that excludes it from
//! aggregation.
//!
//! ## Validity
//!
//! A record is skipped when its rating is missing, when the rating does not
//! parse as an integer, or when its content is empty after trimming. Ratings
//! written as integral floats (`"5.0"`, as spreadsheet exports produce) are
//! accepted; fractional ratings are not. No range is enforced.

use serde::{Deserialize, Serialize};

use crate::error::RecordSkip;

/// A review as read from a tabular source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReviewRecord {
    /// Source identifier; carried into diagnostics only.
    pub id: String,
    /// Publication date as written in the source.
    pub date: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    /// Rating as written in the source, unparsed.
    pub rating: Option<String>,
}

impl RawReviewRecord {
    /// Convenience constructor for in-memory sources and tests.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: None,
            author: None,
            content: Some(content.into()),
            rating: Some(rating.into()),
        }
    }

    /// Apply the validity check.
    ///
    /// # Errors
    ///
    /// Returns the [`RecordSkip`] reason if the record must not contribute
    /// to any aggregate.
    pub fn validate(self) -> Result<ReviewRecord, RecordSkip> {
        let rating = parse_rating(self.rating.as_deref())?;
        let content = match self.content {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(RecordSkip::EmptyContent),
        };
        Ok(ReviewRecord {
            id: self.id,
            author: self.author.unwrap_or_default(),
            date: self.date,
            content,
            rating,
        })
    }
}

/// A review that passed the validity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: String,
    pub author: String,
    pub date: Option<String>,
    /// Non-empty free text.
    pub content: String,
    pub rating: i64,
}

/// A comment sample retained by an accumulator, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainedComment {
    pub text: String,
    pub rating: i64,
}

/// Integers and integral floats (`"5.0"`) are accepted. Fractional ratings
/// such as `"4.5"` are skipped rather than truncated.
fn parse_rating(raw: Option<&str>) -> Result<i64, RecordSkip> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return Err(RecordSkip::MissingRating),
    };
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    // Integral floats only; i64 bounds are checked before the cast.
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(RecordSkip::InvalidRating(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_record_passes() {
        let record = RawReviewRecord::new("r1", "great battle system", "5")
            .validate()
            .unwrap();
        assert_eq!(record.rating, 5);
        assert_eq!(record.content, "great battle system");
    }

    #[test]
    fn missing_rating_is_skipped() {
        let raw = RawReviewRecord {
            id: "r1".into(),
            content: Some("text".into()),
            ..Default::default()
        };
        assert_eq!(raw.validate(), Err(RecordSkip::MissingRating));
    }

    #[test]
    fn blank_rating_is_missing() {
        let raw = RawReviewRecord::new("r1", "text", "  ");
        assert_eq!(raw.validate(), Err(RecordSkip::MissingRating));
    }

    #[test]
    fn non_numeric_rating_is_skipped() {
        let raw = RawReviewRecord::new("r1", "text", "five");
        assert_eq!(
            raw.validate(),
            Err(RecordSkip::InvalidRating("five".into()))
        );
    }

    #[test]
    fn fractional_rating_is_skipped() {
        let raw = RawReviewRecord::new("r1", "text", "4.5");
        assert!(matches!(raw.validate(), Err(RecordSkip::InvalidRating(_))));
    }

    #[test]
    fn integral_float_rating_is_accepted() {
        let record = RawReviewRecord::new("r1", "text", "5.0").validate().unwrap();
        assert_eq!(record.rating, 5);
    }

    #[test]
    fn negative_and_large_ratings_are_unbounded() {
        assert_eq!(
            RawReviewRecord::new("r", "t", "-3").validate().unwrap().rating,
            -3
        );
        assert_eq!(
            RawReviewRecord::new("r", "t", "1000").validate().unwrap().rating,
            1000
        );
    }

    #[test]
    fn whitespace_content_is_skipped() {
        let raw = RawReviewRecord::new("r1", " \t\n", "3");
        assert_eq!(raw.validate(), Err(RecordSkip::EmptyContent));
    }

    #[test]
    fn missing_content_is_skipped() {
        let raw = RawReviewRecord {
            id: "r1".into(),
            rating: Some("3".into()),
            ..Default::default()
        };
        assert_eq!(raw.validate(), Err(RecordSkip::EmptyContent));
    }

    proptest! {
        #[test]
        fn any_integer_rating_round_trips(rating in any::<i64>()) {
            let record = RawReviewRecord::new("r", "text", rating.to_string())
                .validate()
                .unwrap();
            prop_assert_eq!(record.rating, rating);
        }
    }
}
