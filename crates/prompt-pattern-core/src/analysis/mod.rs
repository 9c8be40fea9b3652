//! Pattern analysis over a prompt log snapshot.
//!
//! Orchestrates the pipeline: clustering, size and dismissal filtering,
//! keyword extraction, id and name derivation, and ranking. The entry point
//! [`analyze`] is infallible: insufficient data and internal faults both map
//! to an empty report so hook callers never break their host.

pub mod reports;

use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error, info};

pub use reports::{AnalysisReport, AnalysisStats, Pattern};

use crate::cluster::{Cluster, cluster_items};
use crate::item::Item;
use crate::keywords::extract_keywords;
use crate::naming::{pattern_id, suggest_name};
use crate::similarity::SimilarityMode;

/// Maximum example prompts carried by a pattern.
pub const MAX_EXAMPLES: usize = 5;

/// Default minimum cluster size for a pattern.
pub const DEFAULT_MIN_PATTERN_COUNT: usize = 3;

/// Parameters threaded through one analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Similarity strategy.
    pub mode: SimilarityMode,
    /// Minimum similarity to the seed for joining a cluster.
    pub threshold: f64,
    /// Minimum cluster size for a pattern.
    pub min_pattern_count: usize,
}

impl AnalysisConfig {
    /// Config for `mode` using its calibrated threshold.
    pub const fn for_mode(mode: SimilarityMode) -> Self {
        Self {
            mode,
            threshold: mode.default_threshold(),
            min_pattern_count: DEFAULT_MIN_PATTERN_COUNT,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::for_mode(SimilarityMode::default())
    }
}

/// Items captured at or after `now - days`, in log order.
///
/// A window reaching past the representable date range keeps every item.
pub fn select_window(log: &[Item], now: DateTime<Utc>, days: i64) -> Vec<Item> {
    let Some(cutoff) = TimeDelta::try_days(days).and_then(|span| now.checked_sub_signed(span))
    else {
        debug!(days, "analysis window exceeds the date range; keeping all items");
        return log.to_vec();
    };
    log.iter()
        .filter(|item| item.timestamp >= cutoff)
        .cloned()
        .collect()
}

/// Analyze the last `days` of `log`.
///
/// Like [`analyze`], but `total_items` reports the whole log.
pub fn analyze_window(
    log: &[Item],
    now: DateTime<Utc>,
    days: i64,
    dismissed: &BTreeSet<String>,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let window = select_window(log, now, days);
    debug!(total = log.len(), window = window.len(), days, "selected analysis window");
    let mut report = analyze(&window, dismissed, config);
    report.stats.total_items = log.len();
    report
}

/// Detect repeated request patterns in `items`.
///
/// Never fails: too few items, or a fault inside the pipeline, yields an
/// empty pattern list with the item counts filled in.
#[tracing::instrument(skip_all, fields(items = items.len(), mode = %config.mode))]
pub fn analyze(
    items: &[Item],
    dismissed: &BTreeSet<String>,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let run = catch_unwind(AssertUnwindSafe(|| run_pipeline(items, dismissed, config)));
    run.unwrap_or_else(|_| {
        error!("pattern analysis panicked; reporting no patterns");
        AnalysisReport::empty(items.len(), items.len())
    })
}

fn run_pipeline(
    items: &[Item],
    dismissed: &BTreeSet<String>,
    config: &AnalysisConfig,
) -> AnalysisReport {
    if items.len() < config.min_pattern_count {
        debug!(
            items = items.len(),
            min = config.min_pattern_count,
            "not enough items to analyze"
        );
        return AnalysisReport::empty(items.len(), items.len());
    }

    let clusters = cluster_items(items, config.mode, config.threshold);

    let mut patterns: Vec<Pattern> = clusters
        .iter()
        .filter(|cluster| cluster.len() >= config.min_pattern_count)
        .filter_map(|cluster| {
            let pattern = build_pattern(cluster)?;
            if dismissed.contains(&pattern.id) {
                debug!(id = %pattern.id, "skipping dismissed pattern");
                return None;
            }
            Some(pattern)
        })
        .collect();
    // Stable: equal counts keep cluster order.
    patterns.sort_by(|a, b| b.count.cmp(&a.count));

    let stats = AnalysisStats {
        total_items: items.len(),
        analyzed_items: items.len(),
        clusters_found: clusters.len(),
        patterns_found: patterns.len(),
    };
    info!(
        clusters = stats.clusters_found,
        patterns = stats.patterns_found,
        "pattern analysis complete"
    );
    AnalysisReport { patterns, stats }
}

/// Summarize one cluster. Returns `None` only for an empty cluster.
fn build_pattern(cluster: &Cluster<'_>) -> Option<Pattern> {
    let members = cluster.members();
    // First shortest wins, which is the most recent among equals.
    let representative = members
        .iter()
        .min_by_key(|m| m.item.text.chars().count())?
        .item
        .text
        .clone();

    let keywords = extract_keywords(cluster);
    let suggested_name = suggest_name(&keywords, &representative);

    let mut distinct_projects: Vec<String> = Vec::new();
    for member in members {
        let label = member.item.project_label();
        if !distinct_projects.iter().any(|p| p == label) {
            distinct_projects.push(label.to_string());
        }
    }

    Some(Pattern {
        id: pattern_id(&representative),
        count: cluster.len(),
        example_texts: members
            .iter()
            .take(MAX_EXAMPLES)
            .map(|m| m.item.text.clone())
            .collect(),
        keywords,
        suggested_name,
        first_seen: cluster.oldest()?,
        last_seen: cluster.newest()?,
        distinct_projects,
        representative_text: representative,
    })
}
