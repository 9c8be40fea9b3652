//! Greedy seed-based clustering of captured prompts.
//!
//! Items are visited newest first. Each unassigned item seeds a cluster and
//! absorbs every later unassigned item that is similar enough to the seed.
//! Members are compared with the seed only, never with each other, so two
//! members of one cluster may be dissimilar.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::item::Item;
use crate::similarity::SimilarityMode;
use crate::tokenize::TokenSet;

/// A clustered item together with the tokens it was compared on.
#[derive(Debug, Clone)]
pub struct Member<'a> {
    /// The underlying prompt.
    pub item: &'a Item,
    /// Tokens used for comparison.
    pub tokens: Cow<'a, TokenSet>,
}

/// A group of similar items, newest first. The first member is the seed.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    members: Vec<Member<'a>>,
}

impl<'a> Cluster<'a> {
    /// Members in cluster order (newest first).
    pub fn members(&self) -> &[Member<'a>] {
        &self.members
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members.
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Timestamp of the newest member.
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.members.first().map(|m| m.item.timestamp)
    }

    /// Timestamp of the oldest member.
    pub fn oldest(&self) -> Option<DateTime<Utc>> {
        self.members.last().map(|m| m.item.timestamp)
    }
}

/// Partition `items` into clusters of two or more similar prompts.
///
/// Singleton seeds are dropped. Runs in O(n²) comparisons.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn cluster_items(items: &[Item], mode: SimilarityMode, threshold: f64) -> Vec<Cluster<'_>> {
    let mut sorted: Vec<Member<'_>> = items
        .iter()
        .map(|item| Member {
            item,
            tokens: item.tokens(),
        })
        .collect();
    // Stable: equal timestamps keep input order.
    sorted.sort_by(|a, b| b.item.timestamp.cmp(&a.item.timestamp));

    let mut assigned = vec![false; sorted.len()];
    let mut clusters = Vec::new();

    for i in 0..sorted.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut members = vec![sorted[i].clone()];

        for j in (i + 1)..sorted.len() {
            if assigned[j] {
                continue;
            }
            if mode.similarity(&sorted[i].tokens, &sorted[j].tokens) >= threshold {
                assigned[j] = true;
                members.push(sorted[j].clone());
            }
        }

        if members.len() >= 2 {
            clusters.push(Cluster { members });
        }
    }

    tracing::debug!(clusters = clusters.len(), "clustering complete");
    clusters
}
