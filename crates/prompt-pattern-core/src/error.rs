//! Error types for prompt-pattern-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// No data directory was configured and none could be derived.
    #[error("could not determine a data directory; set `data_dir` in config")]
    NoDataDir,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when writing the prompt store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a store file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A store file could not be serialized.
    #[error("failed to encode {path}: {source}")]
    Encode {
        /// The file being written.
        path: Utf8PathBuf,
        /// The underlying serialization error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
