//! Dismiss command: hide a pattern from future reports.

use anyhow::Context;
use clap::Args;
use owo_colors::OwoColorize;
use prompt_pattern_core::store::PromptStore;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `dismiss` subcommand.
#[derive(Args, Debug)]
pub struct DismissArgs {
    /// Pattern id, as shown by `patterns`
    pub id: String,
}

#[derive(Serialize)]
struct DismissOutcome<'a> {
    id: &'a str,
    newly_dismissed: bool,
}

/// Add a pattern id to the dismissed set.
#[instrument(name = "cmd_dismiss", skip_all, fields(id = %args.id))]
pub fn cmd_dismiss(args: DismissArgs, global_json: bool, store: &PromptStore) -> anyhow::Result<()> {
    let id = args.id.trim();
    if id.is_empty() {
        anyhow::bail!("pattern id must not be empty");
    }

    let mut log = store.load();
    let newly_dismissed = log.dismiss(id);
    if newly_dismissed {
        store.save(&log).context("failed to save prompt log")?;
    }
    debug!(newly_dismissed, "dismiss command finished");

    if global_json {
        let outcome = DismissOutcome {
            id,
            newly_dismissed,
        };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if newly_dismissed {
        println!("{} {}", "Dismissed".green(), id);
    } else {
        println!("{} {}", "Already dismissed".yellow(), id);
    }
    Ok(())
}
