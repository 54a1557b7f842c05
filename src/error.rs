use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors surfaced by the benchmark harness.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Element count was missing, malformed or negative.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration file exists but is not valid TOML for this tool.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// I/O error while reading input or writing artifacts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Logging could not be initialised.
    #[error("logging error: {0}")]
    Logging(String),
}
