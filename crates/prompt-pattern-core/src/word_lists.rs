//! Curated word lists for prompt tokenization and shortcut naming.
//!
//! Stop words cover English and Korean function words. The action table maps
//! request vocabulary in both languages onto a short canonical shortcut name.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Function words dropped by the tokenizer (articles, auxiliaries, pronouns, particles).
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // English
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
        "can", "need", "dare", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as",
        "into", "through", "during", "before", "after", "above", "below", "and", "but", "or",
        "nor", "so", "yet", "both", "either", "neither", "not", "only", "own", "same", "than",
        "too", "very", "just", "this", "that", "these", "those", "it", "its", "me", "my",
        "myself", "we", "our", "ours", "ourselves", "you", "your", "yours", "yourself",
        "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself", "they",
        "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "when", "where",
        "why", "how",
        // Korean
        "이", "그", "저", "것", "수", "등", "들", "및", "에", "의", "가", "를", "은", "는", "이다",
        "있다", "하다", "되다", "않다", "없다", "같다", "위해", "대해", "통해", "따라", "관해",
        "해서", "해줘", "줘", "좀",
    ]
    .into_iter()
    .collect()
});

/// Request vocabulary mapped to canonical shortcut names.
///
/// Order matters: name suggestion returns the first hit in table order.
pub const ACTION_WORDS: &[(&str, &str)] = &[
    ("commit", "commit"),
    ("커밋", "commit"),
    ("test", "test"),
    ("테스트", "test"),
    ("lint", "lint"),
    ("format", "format"),
    ("build", "build"),
    ("빌드", "build"),
    ("deploy", "deploy"),
    ("배포", "deploy"),
    ("review", "review"),
    ("리뷰", "review"),
    ("refactor", "refactor"),
    ("리팩토링", "refactor"),
    ("fix", "fix"),
    ("수정", "fix"),
    ("add", "add"),
    ("추가", "add"),
    ("delete", "delete"),
    ("삭제", "delete"),
    ("update", "update"),
    ("업데이트", "update"),
    ("pr", "pr"),
    ("push", "push"),
    ("푸시", "push"),
];

/// Name used when nothing better can be derived from a cluster.
pub const FALLBACK_NAME: &str = "quick-action";
