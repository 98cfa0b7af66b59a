//! # Sentiment Lexicon
//!
//! Polarity word lists and negation trigger phrases consumed by the
//! sentiment scorer. Lists keep their configured order and duplicates; a
//! word listed twice counts twice.

use serde::{Deserialize, Serialize};

/// Word lists used to derive a review's sentiment adjustment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentLexicon {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    /// Phrases whose presence anywhere in a review flips its polarity.
    #[serde(default)]
    pub negation_patterns: Vec<String>,
}

impl SentimentLexicon {
    pub fn new<P, N, G>(positive: P, negative: N, negation_patterns: G) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: negative.into_iter().map(Into::into).collect(),
            negation_patterns: negation_patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no polarity word is configured; every score is then 0.0.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}
