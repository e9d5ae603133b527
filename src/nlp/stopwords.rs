//! Stopword filtering
//!
//! This module provides a closed English function-word list and a filter
//! that drops those words from a token sequence. The list is a plain value:
//! tests and callers can swap in their own vocabulary.

use rustc_hash::FxHashSet;

use crate::types::Token;

/// English function words removed before graph construction
pub const ENGLISH_STOPWORDS: &[&str] = &[
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "but", "or", "nor", "so", "for", "yet",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite", "down",
    "during", "except", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "outside", "over", "past", "since", "through", "throughout", "to", "toward",
    "under", "underneath", "until", "up", "upon", "with", "within", "without",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "having", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // adverbs
    "again", "almost", "already", "also", "always", "even", "ever", "just", "never", "not",
    "only", "perhaps", "really", "sometimes", "soon", "still", "then", "there", "thus", "very",
    // determiners
    "all", "any", "both", "each", "few", "many", "more", "most", "other", "several", "some",
    "such",
    // other common words
    "that", "this", "these", "those", "here", "how", "why", "what", "which", "who", "whom",
    "whose", "where", "when", "because", "as", "if", "while", "though", "although", "once",
];

/// A filter for removing stopwords from a token sequence
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// Create a filter over [`ENGLISH_STOPWORDS`]
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    ///
    /// Entries are lowercased so they match normalized tokens.
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a token is a stopword
    ///
    /// Plain set lookup: tokens are already lowercase.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Drop stopwords, keeping order and duplicates of everything else
    pub fn filter(&self, tokens: &[Token]) -> Vec<Token> {
        tokens
            .iter()
            .filter(|t| !self.is_stopword(t))
            .cloned()
            .collect()
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
