//! Capture command: the prompt-submit hook.
//!
//! Reads the hook payload from stdin and appends the prompt to the log.
//! Failures are logged and swallowed so the host's turn goes on untouched.

use std::io::Read;

use anyhow::Context;
use clap::Args;
use prompt_pattern_core::config::Config;
use prompt_pattern_core::item::Item;
use prompt_pattern_core::store::PromptStore;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Arguments for the `capture` subcommand.
#[derive(Args, Debug, Default)]
pub struct CaptureArgs {}

/// Payload sent by the host on prompt submission.
#[derive(Debug, Default, Deserialize)]
struct HookInput {
    #[serde(default)]
    prompt: String,
    #[serde(default, alias = "sessionId")]
    session_id: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
}

/// Record one prompt. Always succeeds from the host's point of view.
#[instrument(name = "cmd_capture", skip_all)]
pub fn cmd_capture(
    _args: CaptureArgs,
    config: &Config,
    store: Option<PromptStore>,
) -> anyhow::Result<()> {
    let Some(store) = store else {
        warn!("no data directory available; prompt not captured");
        return Ok(());
    };

    let mut raw = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut raw) {
        warn!(error = %err, "could not read hook input");
        return Ok(());
    }

    if let Err(err) = capture_raw(&raw, config, &store, chrono::Utc::now()) {
        warn!(error = %err, "prompt not captured");
    }
    Ok(())
}

/// Parse a hook payload and append it. Returns whether a prompt was stored.
fn capture_raw(
    raw: &str,
    config: &Config,
    store: &PromptStore,
    now: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<bool> {
    let input: HookInput = serde_json::from_str(raw).context("hook input is not valid JSON")?;
    let prompt = input.prompt.trim();
    if prompt.is_empty() || prompt.starts_with('/') {
        debug!("skipping empty or slash-command prompt");
        return Ok(false);
    }

    let item = Item::capture(
        prompt,
        input.session_id.as_deref(),
        input.cwd.as_deref(),
        now,
    );
    let mut log = store.load();
    log.append(item, config.max_stored_prompts);
    store.save(&log).context("failed to save prompt log")?;
    debug!(stored = log.prompts.len(), "prompt captured");
    Ok(true)
}
