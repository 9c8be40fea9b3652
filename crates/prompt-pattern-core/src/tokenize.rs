//! Prompt tokenization.
//!
//! Turns raw request text into a small set of comparable tokens: case-folded,
//! punctuation-stripped, with one-character words and stop words removed.

use serde::{Deserialize, Serialize};

use crate::word_lists::STOP_WORDS;

/// A deduplicated set of tokens that remembers insertion order.
///
/// Partial similarity walks tokens in this order, so it is part of the
/// observable behavior rather than an incidental detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    /// Create an empty token set.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a token, returning `false` if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.0.push(token);
        true
    }

    /// Whether the set contains `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Number of tokens.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no tokens.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Size of the union of two sets.
    pub fn union_len(&self, other: &Self) -> usize {
        self.len() + other.iter().filter(|t| !self.contains(t)).count()
    }
}

impl From<Vec<String>> for TokenSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<TokenSet> for Vec<String> {
    fn from(set: TokenSet) -> Self {
        set.0
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// Tokenize request text for similarity comparison.
///
/// Any character that is not a letter (of any script), digit, or whitespace
/// is treated as a separator.
pub fn tokenize(text: &str) -> TokenSet {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .filter(|t| !STOP_WORDS.contains(*t))
        .collect()
}
