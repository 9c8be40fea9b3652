//! Captured prompt records.

use std::borrow::Cow;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tokenize::{TokenSet, tokenize};

/// Placeholder used when the host does not report a session or project.
pub const UNKNOWN_TAG: &str = "unknown";

/// One captured user request.
///
/// Field names on disk match the prompt log written by earlier capture hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier assigned at capture time.
    pub id: String,
    /// The request text, trimmed.
    #[serde(rename = "prompt")]
    pub text: String,
    /// When the request was captured.
    pub timestamp: DateTime<Utc>,
    /// Host session the request came from.
    #[serde(rename = "sessionId", default = "unknown_tag")]
    pub session_tag: String,
    /// Working directory of the host when the request was made.
    #[serde(rename = "project", default = "unknown_tag")]
    pub project_tag: String,
    /// Cached tokens; computed on demand when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenSet>,
}

fn unknown_tag() -> String {
    UNKNOWN_TAG.to_string()
}

impl Item {
    /// Build a freshly captured item with a new id and cached tokens.
    pub fn capture(
        text: &str,
        session: Option<&str>,
        project: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let text = text.trim().to_string();
        let tokens = tokenize(&text);
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            text,
            timestamp: now,
            session_tag: session.map_or_else(unknown_tag, str::to_string),
            project_tag: project.map_or_else(unknown_tag, str::to_string),
            tokens: Some(tokens),
        }
    }

    /// Tokens for this item, borrowed from the cache when present.
    pub fn tokens(&self) -> Cow<'_, TokenSet> {
        match self.tokens {
            Some(ref tokens) => Cow::Borrowed(tokens),
            None => Cow::Owned(tokenize(&self.text)),
        }
    }

    /// Last path component of the project tag, used when listing projects.
    ///
    /// Tags without one, such as `""` or `"/"`, read as [`UNKNOWN_TAG`].
    pub fn project_label(&self) -> &str {
        Utf8Path::new(&self.project_tag)
            .file_name()
            .unwrap_or(UNKNOWN_TAG)
    }
}
