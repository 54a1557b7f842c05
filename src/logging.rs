use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{BenchError, Result};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `level` when set. Output goes to stderr so the
/// report on stdout stays clean.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| BenchError::Logging(format!("invalid log level: {e}")))?,
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| BenchError::Logging("logging already initialized".into()))
}
