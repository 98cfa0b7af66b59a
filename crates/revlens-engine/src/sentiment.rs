//! # Sentiment Scorer
//!
//! Lexicon-based polarity scoring.
//!
//! Each lexicon word that occurs as a substring of the raw content counts
//! once. Negation is a single content-wide flag: if any negation phrase
//! occurs anywhere, every polarity word in the review is read as negated.
//!
//! | negation | positive word | negative word |
//! |----------|---------------|---------------|
//! | absent   | +0.2          | −0.2          |
//! | present  | −0.2          | +0.1          |
//!
//! Matching is case-sensitive with no normalization.

use serde::Serialize;

use revlens_core::SentimentLexicon;

const POSITIVE_WEIGHT: f64 = 0.2;
const NEGATIVE_WEIGHT: f64 = 0.2;
const NEGATED_POSITIVE_WEIGHT: f64 = 0.2;
const NEGATED_NEGATIVE_WEIGHT: f64 = 0.1;

/// The inputs and result of one sentiment computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub positive_matches: usize,
    pub negative_matches: usize,
    pub negated: bool,
    pub adjustment: f64,
}

impl SentimentBreakdown {
    /// Compute the breakdown for `content`.
    pub fn analyze(content: &str, lexicon: &SentimentLexicon) -> Self {
        let negated = lexicon
            .negation_patterns
            .iter()
            .any(|pattern| content.contains(pattern.as_str()));
        let positive_matches = count_contained(content, &lexicon.positive);
        let negative_matches = count_contained(content, &lexicon.negative);

        let mut adjustment = 0.0;
        if negated {
            adjustment -= positive_matches as f64 * NEGATED_POSITIVE_WEIGHT;
            adjustment += negative_matches as f64 * NEGATED_NEGATIVE_WEIGHT;
        } else {
            adjustment += positive_matches as f64 * POSITIVE_WEIGHT;
            adjustment -= negative_matches as f64 * NEGATIVE_WEIGHT;
        }

        Self {
            positive_matches,
            negative_matches,
            negated,
            adjustment,
        }
    }
}

/// Signed sentiment adjustment of `content`. Returns 0.0 when no polarity
/// word matches.
pub fn score(content: &str, lexicon: &SentimentLexicon) -> f64 {
    SentimentBreakdown::analyze(content, lexicon).adjustment
}

fn count_contained(content: &str, words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| content.contains(w.as_str()))
        .count()
}
