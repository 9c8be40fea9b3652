//! Pattern identifiers and shortcut name suggestion.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::word_lists::{ACTION_WORDS, FALLBACK_NAME};

/// Prefix carried by every pattern id.
pub const PATTERN_ID_PREFIX: &str = "pattern_";

static ACTION_SCANNER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::new(ACTION_WORDS.iter().map(|(key, _)| key)).expect("valid action words")
});

/// Anything outside ASCII letters/digits and precomposed Hangul syllables.
static NAME_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\x{AC00}-\x{D7A3}]").expect("valid regex"));

/// Stable identifier for a pattern, derived from its representative text.
///
/// Folds the UTF-16 code units of `text` with `h = h * 31 + unit` in wrapping
/// 32-bit signed arithmetic, then renders `|h|` in base 36. Ids already stored
/// in dismissal lists depend on this exact recipe.
pub fn pattern_id(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("{PATTERN_ID_PREFIX}{}", to_base36(hash.unsigned_abs()))
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Suggest a short shortcut name for a pattern.
///
/// Tries, in order: an exact keyword hit in the action table, a keyword that
/// contains or is contained by a table key, a table key found in the
/// representative text, and finally the sanitized top keyword.
pub fn suggest_name(keywords: &[String], representative: &str) -> String {
    let exact = keywords.iter().find_map(|keyword| {
        ACTION_WORDS
            .iter()
            .find(|(key, _)| *key == keyword.as_str())
            .map(|(_, name)| *name)
    });
    if let Some(name) = exact {
        return name.to_string();
    }

    let nested = keywords.iter().find_map(|keyword| {
        ACTION_WORDS
            .iter()
            .find(|(key, _)| keyword.contains(key) || key.contains(keyword.as_str()))
            .map(|(_, name)| *name)
    });
    if let Some(name) = nested {
        return name.to_string();
    }

    let lowered = representative.to_lowercase();
    let in_text = ACTION_SCANNER
        .find_overlapping_iter(&lowered)
        .map(|m| m.pattern().as_usize())
        .min();
    if let Some(index) = in_text {
        return ACTION_WORDS[index].1.to_string();
    }

    keywords
        .first()
        .map(|top| NAME_JUNK.replace_all(&top.to_lowercase(), "").into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}
