//! On-disk prompt log.
//!
//! The log lives in `prompts.json` inside the data directory as
//! `{ "prompts": [...], "dismissed": [...] }`. Reads are forgiving: a missing
//! or unparseable file is treated as an empty log, and a damaged entry is
//! skipped without losing its neighbours, so the capture and suggestion hooks
//! keep working. Writes go through a temp file and a rename.

use std::collections::BTreeSet;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::item::Item;

/// File name of the prompt log.
pub const PROMPTS_FILE: &str = "prompts.json";

/// File name of the last-suggestion marker.
pub const LAST_SUGGEST_FILE: &str = "last-suggest.json";

/// Captured prompts plus the ids of dismissed patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptLog {
    /// Captured prompts, oldest first.
    pub prompts: Vec<Item>,
    /// Pattern ids the user asked never to see again.
    pub dismissed: BTreeSet<String>,
}

impl PromptLog {
    /// Append `item`, then drop the oldest entries beyond `max_stored`.
    pub fn append(&mut self, item: Item, max_stored: usize) {
        self.prompts.push(item);
        if self.prompts.len() > max_stored {
            let excess = self.prompts.len() - max_stored;
            self.prompts.drain(..excess);
            debug!(dropped = excess, "trimmed prompt log");
        }
    }

    /// Mark a pattern as dismissed. Returns `false` if it already was.
    pub fn dismiss(&mut self, id: &str) -> bool {
        self.dismissed.insert(id.to_string())
    }
}

/// `prompts.json` as found on disk, before entries are validated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLog {
    prompts: Value,
    dismissed: Value,
}

impl RawLog {
    fn into_log(self, path: &Utf8Path) -> PromptLog {
        let prompts = list_entries(self.prompts, "prompts", path)
            .filter_map(|(index, entry)| {
                serde_json::from_value::<Item>(entry)
                    .inspect_err(|e| {
                        warn!(%path, index, error = %e, "skipping unreadable prompt");
                    })
                    .ok()
            })
            .collect();
        let dismissed = list_entries(self.dismissed, "dismissed", path)
            .filter_map(|(index, entry)| match entry {
                Value::String(id) => Some(id),
                _ => {
                    warn!(%path, index, "skipping non-string dismissed id");
                    None
                }
            })
            .collect();
        PromptLog { prompts, dismissed }
    }
}

fn list_entries(
    value: Value,
    field: &'static str,
    path: &Utf8Path,
) -> impl Iterator<Item = (usize, Value)> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Null => Vec::new(),
        _ => {
            warn!(%path, field, "expected a list; ignoring field");
            Vec::new()
        }
    };
    entries.into_iter().enumerate()
}

#[derive(Debug, Serialize, Deserialize)]
struct SuggestMarker {
    timestamp: DateTime<Utc>,
}

/// Handle on the data directory holding the prompt log.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: Utf8PathBuf,
}

impl PromptStore {
    /// Use `dir` as the data directory. Nothing is touched until a write.
    pub fn open(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Path of the prompt log file.
    pub fn prompts_path(&self) -> Utf8PathBuf {
        self.dir.join(PROMPTS_FILE)
    }

    /// Load the prompt log.
    ///
    /// Missing or unparseable files yield an empty log. Entries that fail to
    /// decode are dropped one by one, and the dismissed ids are read
    /// independently of the prompts.
    #[tracing::instrument(skip(self), fields(dir = %self.dir))]
    pub fn load(&self) -> PromptLog {
        let path = self.prompts_path();
        let log = read_json::<RawLog>(&path)
            .unwrap_or_default()
            .into_log(&path);
        debug!(
            prompts = log.prompts.len(),
            dismissed = log.dismissed.len(),
            "loaded prompt log"
        );
        log
    }

    /// Write the prompt log atomically.
    #[tracing::instrument(skip(self, log), fields(dir = %self.dir, prompts = log.prompts.len()))]
    pub fn save(&self, log: &PromptLog) -> StoreResult<()> {
        write_json(&self.prompts_path(), log)
    }

    /// When the suggestion hook last spoke up, if ever.
    pub fn last_suggested(&self) -> Option<DateTime<Utc>> {
        read_json::<SuggestMarker>(&self.dir.join(LAST_SUGGEST_FILE)).map(|m| m.timestamp)
    }

    /// Remember that a suggestion was shown at `now`.
    pub fn record_suggestion(&self, now: DateTime<Utc>) -> StoreResult<()> {
        write_json(
            &self.dir.join(LAST_SUGGEST_FILE),
            &SuggestMarker { timestamp: now },
        )
    }
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Option<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(%path, error = %e, "could not read store file");
            return None;
        }
    };
    serde_json::from_str(&raw)
        .inspect_err(|e| warn!(%path, error = %e, "ignoring malformed store file"))
        .ok()
}

fn write_json<T: Serialize>(path: &Utf8Path, value: &T) -> StoreResult<()> {
    let io_err = |path: &Utf8Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| StoreError::Io { path, source }
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let encoded = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, encoded).map_err(io_err(&tmp))?;
    fs::rename(&tmp, path).map_err(io_err(path))?;
    Ok(())
}
