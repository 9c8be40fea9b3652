//! Majority keyword extraction.

use std::collections::HashMap;

use crate::cluster::Cluster;

/// Maximum keywords reported per cluster.
pub const MAX_KEYWORDS: usize = 5;

/// Tokens shared by at least half of a cluster's members, most frequent first.
///
/// Ties keep the order in which tokens were first seen (member order, then
/// token order within a member).
pub fn extract_keywords(cluster: &Cluster<'_>) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for member in cluster.members() {
        for token in member.tokens.iter() {
            match index.get(token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push((token, 1));
                }
            }
        }
    }

    let required = cluster.len().div_ceil(2);
    let mut keywords: Vec<(&str, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= required)
        .collect();
    keywords.sort_by(|a, b| b.1.cmp(&a.1));
    keywords.truncate(MAX_KEYWORDS);

    keywords
        .into_iter()
        .map(|(token, _)| token.to_string())
        .collect()
}
