//! Command implementations.

use prompt_pattern_core::analysis::AnalysisConfig;
use prompt_pattern_core::config::Config;
use prompt_pattern_core::similarity::SimilarityMode;

pub mod capture;
pub mod dismiss;
pub mod info;
pub mod patterns;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod suggest;

/// Apply per-invocation overrides on top of the configured analysis settings.
///
/// Choosing a mode without a threshold uses that mode's calibrated threshold
/// rather than one configured for the other mode.
pub fn analysis_config(
    config: &Config,
    mode: Option<SimilarityMode>,
    threshold: Option<f64>,
    min_count: Option<usize>,
) -> AnalysisConfig {
    let mut analysis = config.analysis_config();
    if let Some(mode) = mode
        && mode != config.similarity_mode
    {
        analysis.mode = mode;
        analysis.threshold = mode.default_threshold();
    }
    if let Some(threshold) = threshold {
        analysis.threshold = threshold;
    }
    if let Some(min_count) = min_count {
        analysis.min_pattern_count = min_count;
    }
    analysis
}
