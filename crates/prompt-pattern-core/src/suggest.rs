//! Deciding whether, and what, to suggest after a conversation turn.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::analysis::{AnalysisConfig, Pattern, analyze, select_window};
use crate::store::PromptLog;

/// Longest representative text shown in a suggestion.
pub const SUGGESTION_TEXT_LIMIT: usize = 60;

/// When the suggestion hook is allowed to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestPolicy {
    /// Hours to stay quiet after a suggestion.
    pub cooldown_hours: i64,
    /// Prompts required in the log, and in the window, before suggesting.
    pub min_prompts_before_suggest: usize,
    /// Days of history to analyze.
    pub days_to_analyze: i64,
}

impl Default for SuggestPolicy {
    fn default() -> Self {
        Self {
            cooldown_hours: 24,
            min_prompts_before_suggest: 5,
            days_to_analyze: 14,
        }
    }
}

/// `false` while the cooldown since `last` is still running.
///
/// A cooldown too long to represent never runs out.
pub fn should_suggest(
    last: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown_hours: i64,
) -> bool {
    last.is_none_or(|last| match TimeDelta::try_hours(cooldown_hours) {
        Some(cooldown) => now.signed_duration_since(last) >= cooldown,
        None => cooldown_hours < 0,
    })
}

/// The highest-ranked pattern worth suggesting, if any.
///
/// Dismissed patterns never come back.
#[tracing::instrument(skip_all, fields(prompts = log.prompts.len()))]
pub fn top_suggestion(
    log: &PromptLog,
    now: DateTime<Utc>,
    policy: &SuggestPolicy,
    config: &AnalysisConfig,
) -> Option<Pattern> {
    if log.prompts.len() < policy.min_prompts_before_suggest {
        debug!("not enough prompts logged yet");
        return None;
    }

    let window = select_window(&log.prompts, now, policy.days_to_analyze);
    if window.len() < policy.min_prompts_before_suggest {
        debug!(window = window.len(), "not enough recent prompts");
        return None;
    }

    analyze(&window, &log.dismissed, config)
        .patterns
        .into_iter()
        .next()
}

/// Format a pattern as a note for the assistant to relay.
pub fn render_suggestion(pattern: &Pattern) -> String {
    let text = truncate(&pattern.representative_text, SUGGESTION_TEXT_LIMIT);
    format!(
        "<pattern-suggestion>\n\
         The user has asked something like \"{text}\" {count} times recently.\n\
         A shortcut command /{name} could save them time.\n\
         Briefly mention this in one sentence at the end of your response. \
         They can run `prompt-pattern patterns` to see every repeated request, \
         or `prompt-pattern dismiss {id}` to stop hearing about this one.\n\
         </pattern-suggestion>",
        count = pattern.count,
        name = pattern.suggested_name,
        id = pattern.id,
    )
}

/// Cut `text` to `limit` chars, marking the cut with `...`.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
