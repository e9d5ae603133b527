//! Text normalization
//!
//! Maps arbitrary text onto a lowercase, single-spaced string over a closed
//! alphabet. Anything outside the alphabet becomes a delimiter.

use rustc_hash::FxHashSet;

/// The set of characters that survive normalization
///
/// Whitespace is never a member: the space is reserved as the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alphabet {
    /// `a-z` and `0-9`
    AsciiAlphanumeric,
    /// An explicit character set
    Custom(FxHashSet<char>),
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::AsciiAlphanumeric
    }
}

impl Alphabet {
    /// The default `a-z0-9` alphabet
    pub fn ascii_alphanumeric() -> Self {
        Self::AsciiAlphanumeric
    }

    /// Build an alphabet from explicit characters.
    ///
    /// Characters are lowercased, since they are matched against lowercased
    /// input, and whitespace is dropped.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let set = chars
            .into_iter()
            .flat_map(char::to_lowercase)
            .filter(|c| !c.is_whitespace())
            .collect();
        Self::Custom(set)
    }

    /// Check whether a (lowercased) character is kept
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        match self {
            Self::AsciiAlphanumeric => c.is_ascii_lowercase() || c.is_ascii_digit(),
            Self::Custom(set) => set.contains(&c),
        }
    }
}

/// Lowercases text and collapses every non-alphabet run into one space
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    alphabet: Alphabet,
}

impl Normalizer {
    /// Create a normalizer over the default alphabet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer over a custom alphabet
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// The alphabet in use
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Normalize `text`.
    ///
    /// Equivalent to: lowercase, replace non-alphabet chars with spaces,
    /// collapse space runs, trim. Fused into a single scan: a pending
    /// delimiter is only written once the next kept character shows up, so
    /// leading and trailing delimiters vanish for free.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pending_space = false;

        for c in text.chars().flat_map(char::to_lowercase) {
            if self.alphabet.contains(c) {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            } else {
                pending_space = true;
            }
        }

        out
    }
}
