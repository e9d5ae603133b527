//! Whitespace tokenization of normalized text

use crate::types::Token;

/// Splits normalized text on single spaces
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into owned tokens, in order.
    ///
    /// Zero-length fragments are dropped, so this is also safe on text that
    /// was not normalized first.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenize_borrowed(text)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Split `text` into borrowed tokens, in order
    pub fn tokenize_borrowed<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(' ').filter(|t| !t.is_empty()).collect()
    }
}
