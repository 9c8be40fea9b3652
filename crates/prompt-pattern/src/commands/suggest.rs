//! Suggest command: the end-of-turn hook.
//!
//! Prints a `<pattern-suggestion>` block on stdout when a repeated request is
//! worth a shortcut, at most once per cooldown period.

use chrono::{DateTime, Utc};
use clap::Args;
use prompt_pattern_core::config::Config;
use prompt_pattern_core::store::PromptStore;
use prompt_pattern_core::suggest::{render_suggestion, should_suggest, top_suggestion};
use tracing::{debug, info, instrument, warn};

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug, Default)]
pub struct SuggestArgs {
    /// Ignore the cooldown since the last suggestion
    #[arg(long)]
    pub force: bool,
}

/// Maybe print a suggestion. Always succeeds from the host's point of view.
#[instrument(name = "cmd_suggest", skip_all, fields(force = args.force))]
pub fn cmd_suggest(
    args: SuggestArgs,
    config: &Config,
    store: Option<PromptStore>,
) -> anyhow::Result<()> {
    let Some(store) = store else {
        warn!("no data directory available; nothing to suggest");
        return Ok(());
    };
    if let Some(block) = next_suggestion(&args, config, &store, Utc::now()) {
        println!("{block}");
    }
    Ok(())
}

fn next_suggestion(
    args: &SuggestArgs,
    config: &Config,
    store: &PromptStore,
    now: DateTime<Utc>,
) -> Option<String> {
    if !args.force && !should_suggest(store.last_suggested(), now, config.suggest_cooldown_hours) {
        debug!("suggestion cooldown still running");
        return None;
    }

    let log = store.load();
    let pattern = top_suggestion(
        &log,
        now,
        &config.suggest_policy(),
        &config.analysis_config(),
    )?;

    if let Err(err) = store.record_suggestion(now) {
        warn!(error = %err, "could not record suggestion time");
    }
    info!(id = %pattern.id, name = %pattern.suggested_name, "suggesting shortcut");
    Some(render_suggestion(&pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use chrono::Duration;
    use prompt_pattern_core::item::Item;
    use tempfile::TempDir;

    fn seeded_store(now: DateTime<Utc>) -> (TempDir, PromptStore) {
        let tmp = TempDir::new().unwrap();
        let store = PromptStore::open(Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap());
        let mut log = store.load();
        for (i, text) in [
            "commit the code",
            "please commit the code changes",
            "commit code right now",
            "what is the weather",
            "explain lifetimes",
        ]
        .iter()
        .enumerate()
        {
            log.append(
                Item::capture(text, None, None, now - Duration::minutes(10 - i as i64)),
                100,
            );
        }
        store.save(&log).unwrap();
        (tmp, store)
    }

    #[test]
    fn suggests_then_cools_down() {
        let now = Utc::now();
        let (_tmp, store) = seeded_store(now);
        let config = Config::default();
        let args = SuggestArgs::default();

        let block = next_suggestion(&args, &config, &store, now).unwrap();
        assert!(block.contains("/commit"));
        assert_eq!(store.last_suggested(), Some(now));

        assert!(next_suggestion(&args, &config, &store, now + Duration::hours(1)).is_none());
        assert!(next_suggestion(&args, &config, &store, now + Duration::hours(25)).is_some());
    }

    #[test]
    fn force_skips_cooldown() {
        let now = Utc::now();
        let (_tmp, store) = seeded_store(now);
        let config = Config::default();
        store.record_suggestion(now).unwrap();

        let forced = SuggestArgs { force: true };
        assert!(next_suggestion(&forced, &config, &store, now).is_some());
    }

    #[test]
    fn empty_store_says_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = PromptStore::open(Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap());
        let args = SuggestArgs { force: true };
        assert!(next_suggestion(&args, &Config::default(), &store, Utc::now()).is_none());
        assert!(store.last_suggested().is_none());
    }
}
