//! # Tokenizer Capability
//!
//! The engine only needs token surface strings for a text. Morphological
//! analysis lives behind the [`Tokenizer`] trait; two lightweight
//! implementations ship with the crate.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::TokenizeError;

/// Splits a text into token surface strings.
///
/// Implementations may fail for input they cannot handle. The engine treats
/// a failure as "no tokens" for that review and keeps going.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text` into surface strings.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError`] when the input cannot be tokenized.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

/// UAX #29 word-boundary tokenizer.
///
/// Emits every word-bound segment that contains at least one alphanumeric
/// character, so punctuation and whitespace never become tokens.
#[derive(Debug, Clone, Default)]
pub struct UnicodeWordTokenizer {
    max_input_bytes: Option<usize>,
}

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inputs longer than `limit` bytes with a [`TokenizeError`].
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        if let Some(limit) = self.max_input_bytes {
            if text.len() > limit {
                return Err(TokenizeError::new(format!(
                    "input is {} bytes, limit is {limit}",
                    text.len()
                )));
            }
        }
        Ok(text
            .split_word_bounds()
            .filter(|seg| seg.chars().any(char::is_alphanumeric))
            .map(str::to_string)
            .collect())
    }
}

/// Splits on Unicode whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_tokenizer_splits_words() {
        let tokens = WhitespaceTokenizer.tokenize("great  battle\tsystem").unwrap();
        assert_eq!(tokens, vec!["great", "battle", "system"]);
    }

    #[test]
    fn unicode_tokenizer_drops_punctuation() {
        let tokens = UnicodeWordTokenizer::new()
            .tokenize("Great battle, poor UI!")
            .unwrap();
        assert_eq!(tokens, vec!["Great", "battle", "poor", "UI"]);
    }

    #[test]
    fn unicode_tokenizer_handles_cjk() {
        let tokens = UnicodeWordTokenizer::new().tokenize("ガチャが渋い").unwrap();
        assert!(!tokens.is_empty());
        assert_eq!(tokens.concat(), "ガチャが渋い");
    }

    #[test]
    fn unicode_tokenizer_enforces_limit() {
        let tokenizer = UnicodeWordTokenizer::new().with_max_input_bytes(4);
        assert!(tokenizer.tokenize("abcd").is_ok());
        let err = tokenizer.tokenize("abcde").unwrap_err();
        assert!(err.message.contains("limit is 4"));
    }

    #[test]
    fn boxed_tokenizer_delegates() {
        let boxed: Box<dyn Tokenizer> = Box::new(WhitespaceTokenizer);
        assert_eq!(boxed.tokenize("a b").unwrap().len(), 2);
    }
}
