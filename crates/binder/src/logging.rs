//! Tracing subscriber setup for hosts and the `inventory-watch` binary.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the embedding application.
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// File name used inside [`LoggingConfig::log_dir`].
pub const LOG_FILE_NAME: &str = "binder.log";

/// Installs a global subscriber logging to stderr and, optionally, a file.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`]. The returned
/// guard flushes the file writer on drop and must be held for as long as
/// logging is needed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log directive {:?}", config.level))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/{}", dir.display(), LOG_FILE_NAME);
    }

    Ok(guard)
}
