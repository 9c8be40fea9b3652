//! Token-set similarity scoring.
//!
//! Two strategies share one interface: plain Jaccard over exact tokens, and a
//! partial variant that also pairs tokens sharing a stem (containment or a
//! common prefix), which absorbs inflection in agglutinative languages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tokenize::TokenSet;

/// Minimum shared leading characters for two tokens to count as the same stem.
const MIN_SHARED_PREFIX: usize = 2;

/// Similarity strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SimilarityMode {
    /// Jaccard index with stem-aware token pairing (default).
    #[default]
    Partial,
    /// Plain Jaccard index over exact tokens.
    Exact,
}

impl SimilarityMode {
    /// Returns the mode name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Exact => "exact",
        }
    }

    /// Threshold this mode was calibrated with.
    pub const fn default_threshold(&self) -> f64 {
        match self {
            Self::Partial => 0.25,
            Self::Exact => 0.40,
        }
    }

    /// Score two token sets in `[0, 1]`. Empty input scores 0.
    pub fn similarity(&self, a: &TokenSet, b: &TokenSet) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let matched = match self {
            Self::Exact => a.iter().filter(|t| b.contains(t)).count(),
            Self::Partial => greedy_partial_matches(a, b),
        };
        matched as f64 / a.union_len(b) as f64
    }
}

impl std::fmt::Display for SimilarityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether two tokens are equal, nested, or share a stem prefix.
pub fn partial_match(a: &str, b: &str) -> bool {
    if a == b || a.contains(b) || b.contains(a) {
        return true;
    }
    let shared = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count();
    shared >= MIN_SHARED_PREFIX
}

/// Pair each token of `a`, in order, with the first unused matching token of `b`.
///
/// This is a greedy matching, not a maximum one. Cluster membership depends on
/// reproducing it exactly.
fn greedy_partial_matches(a: &TokenSet, b: &TokenSet) -> usize {
    let candidates: Vec<&str> = b.iter().collect();
    let mut used = vec![false; candidates.len()];
    let mut matched = 0;

    for token in a.iter() {
        let hit = candidates
            .iter()
            .enumerate()
            .find(|(i, other)| !used[*i] && partial_match(token, other));
        if let Some((i, _)) = hit {
            used[i] = true;
            matched += 1;
        }
    }
    matched
}
