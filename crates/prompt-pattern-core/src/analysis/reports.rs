//! Report structs for pattern analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of one analysis run over a prompt log snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Detected patterns, most frequent first.
    pub patterns: Vec<Pattern>,
    /// Counters describing the run.
    pub stats: AnalysisStats,
}

impl AnalysisReport {
    /// An empty result for `total` logged and `analyzed` windowed items.
    pub fn empty(total: usize, analyzed: usize) -> Self {
        Self {
            patterns: Vec::new(),
            stats: AnalysisStats {
                total_items: total,
                analyzed_items: analyzed,
                ..AnalysisStats::default()
            },
        }
    }
}

/// Counters describing an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisStats {
    /// Items in the log before windowing.
    pub total_items: usize,
    /// Items that took part in clustering.
    pub analyzed_items: usize,
    /// Clusters with two or more members.
    pub clusters_found: usize,
    /// Patterns reported after size and dismissal filtering.
    pub patterns_found: usize,
}

/// A repeated request, summarized from one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pattern {
    /// Stable id derived from `representative_text`.
    pub id: String,
    /// Number of prompts in the cluster.
    pub count: usize,
    /// Shortest prompt in the cluster.
    pub representative_text: String,
    /// Up to five prompts, newest first.
    pub example_texts: Vec<String>,
    /// Up to five tokens shared by most of the cluster.
    pub keywords: Vec<String>,
    /// Proposed shortcut name (without the leading slash).
    pub suggested_name: String,
    /// Timestamp of the oldest prompt.
    pub first_seen: DateTime<Utc>,
    /// Timestamp of the newest prompt.
    pub last_seen: DateTime<Utc>,
    /// Projects the prompts were issued from.
    pub distinct_projects: Vec<String>,
}
