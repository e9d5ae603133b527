//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary before graph
//! construction. Implementations are statically dispatched; the built-in
//! [`Normalizer`], [`Tokenizer`], and [`StopwordFilter`] are the defaults.

use crate::nlp::normalizer::Normalizer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::Token;

// ============================================================================
// TextNormalizer: raw text to canonical form (stage 0)
// ============================================================================

/// Maps raw text to normalized text.
///
/// # Contract
///
/// - Never fails; any `&str` is accepted.
/// - **Idempotent**: normalizing normalized text returns it unchanged.
pub trait TextNormalizer {
    fn normalize(&self, text: &str) -> String;
}

impl TextNormalizer for Normalizer {
    #[inline]
    fn normalize(&self, text: &str) -> String {
        Normalizer::normalize(self, text)
    }
}

// ============================================================================
// TextTokenizer: normalized text to ordered tokens (stage 1)
// ============================================================================

/// Splits normalized text into tokens, preserving order.
///
/// # Contract
///
/// - No returned token is empty.
pub trait TextTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

impl TextTokenizer for Tokenizer {
    #[inline]
    fn tokenize(&self, text: &str) -> Vec<Token> {
        Tokenizer::tokenize(self, text)
    }
}

// ============================================================================
// TokenFilter: drop tokens before graph construction (stage 2)
// ============================================================================

/// Decides which tokens survive into the graph.
///
/// A pure predicate: surviving tokens keep their order and duplicates.
pub trait TokenFilter {
    fn keep(&self, token: &str) -> bool;

    /// Apply [`keep`](Self::keep) to a whole sequence.
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter().filter(|t| self.keep(t)).collect()
    }
}

impl TokenFilter for StopwordFilter {
    #[inline]
    fn keep(&self, token: &str) -> bool {
        !self.is_stopword(token)
    }
}

/// Keeps every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFilter;

impl TokenFilter for NoopFilter {
    #[inline]
    fn keep(&self, _token: &str) -> bool {
        true
    }
}
