//! Logging and tracing setup.
//!
//! Human-readable events go to stderr so stdout stays reserved for command
//! output (hooks hand their stdout to the assistant). When a log file or
//! directory is configured, events are also written there as JSON lines.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "PROMPT_PATTERN_LOG_PATH";
const LOG_DIR_ENV: &str = "PROMPT_PATTERN_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "prompt-pattern.jsonl";

/// Where JSON log lines go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit file to append to.
    pub log_path: Option<PathBuf>,
    /// Directory for a daily-rotated log file.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the log environment variables, falling back to `log_dir` from config.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        log_path: Option<PathBuf>,
        env_log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let log_path = log_path.filter(|p| !p.as_os_str().is_empty());
        let log_dir = env_log_dir
            .filter(|p| !p.as_os_str().is_empty())
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    const fn file_logging(&self) -> bool {
        self.log_path.is_some() || self.log_dir.is_some()
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, each `-v`
/// raises the level, and the configured level is the baseline.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(level_directive(quiet, verbose, default_level))
}

fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes the file writer. When the log file cannot be opened nothing is
/// installed, so the caller may retry with [`ObservabilityConfig::default`]
/// to log to stderr only.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if !config.file_logging() {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    }

    let appender = file_appender(config)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(Some(guard))
}

fn file_appender(config: &ObservabilityConfig) -> anyhow::Result<RollingFileAppender> {
    if let Some(ref path) = config.log_path {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file = path
            .file_name()
            .with_context(|| format!("log path has no file name: {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        return RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file.to_string_lossy())
            .build(dir)
            .with_context(|| format!("failed to open log file {}", path.display()));
    }

    let dir = config
        .log_dir
        .as_deref()
        .context("no log destination configured")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(DEFAULT_LOG_FILE)
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))
}
