//! Core library for prompt-pattern.
//!
//! Finds requests a user keeps making to an assistant and proposes short
//! command names for them. Used by the `prompt-pattern` CLI, its hooks and
//! its MCP server.
//!
//! # Modules
//!
//! - [`tokenize`] - Normalizing text into token sets
//! - [`similarity`] - Partial and exact token-set similarity
//! - [`cluster`] - Greedy grouping of similar items
//! - [`keywords`] - Majority keywords of a cluster
//! - [`naming`] - Pattern ids and shortcut names
//! - [`analysis`] - The detection pipeline and its report types
//! - [`store`] - The on-disk prompt log
//! - [`suggest`] - The post-turn suggestion gate
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::BTreeSet;
//! use prompt_pattern_core::{AnalysisConfig, Item, analyze};
//!
//! let now = chrono::Utc::now();
//! let items: Vec<Item> = ["commit the code", "please commit the code changes", "commit code right now"]
//!     .iter()
//!     .map(|text| Item::capture(text, None, None, now))
//!     .collect();
//!
//! let report = analyze(&items, &BTreeSet::new(), &AnalysisConfig::default());
//! for pattern in &report.patterns {
//!     println!("/{} ({}x)", pattern.suggested_name, pattern.count);
//! }
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod error;
pub mod item;
pub mod keywords;
pub mod naming;
pub mod similarity;
pub mod store;
pub mod suggest;
pub mod tokenize;
pub mod word_lists;

pub use analysis::{
    AnalysisConfig, AnalysisReport, AnalysisStats, Pattern, analyze, analyze_window, select_window,
};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, StoreError, StoreResult};
pub use item::Item;
pub use similarity::SimilarityMode;
pub use store::{PromptLog, PromptStore};
pub use tokenize::{TokenSet, tokenize};
