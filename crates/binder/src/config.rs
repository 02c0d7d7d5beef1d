//! Binder configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Tunables for a [`Binder`](crate::Binder).
#[derive(Clone, Debug)]
pub struct BinderConfig {
    /// Backlog of queued events above which a warning is logged. Events
    /// raised by subscribers are always delivered; a backlog this deep
    /// usually means a subscriber keeps reacting to its own changes.
    pub queue_warn_len: usize,
    /// Emit one trace line per diff entry.
    pub log_diffs: bool,
}

impl BinderConfig {
    pub const DEFAULT_QUEUE_WARN_LEN: usize = 64;

    pub const fn new() -> Self {
        Self {
            queue_warn_len: Self::DEFAULT_QUEUE_WARN_LEN,
            log_diffs: false,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BINDER_QUEUE_WARN_LEN` - Event backlog warning threshold (default: 64, min: 1)
    /// - `BINDER_LOG_DIFFS` - Trace every diff entry (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(len) = read_env::<usize>("BINDER_QUEUE_WARN_LEN") {
            config.queue_warn_len = len.max(1);
        }

        if let Some(enable) = read_env::<bool>("BINDER_LOG_DIFFS") {
            config.log_diffs = enable;
        } else if env::var("BINDER_LOG_DIFFS").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.log_diffs = true;
        }

        config
    }
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where and how verbosely to log.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Default filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for a log file; stderr only when `None`.
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Environment variables:
    /// - `BINDER_LOG_LEVEL` - Default directive (default: "info")
    /// - `BINDER_LOG_DIR` - Also write `binder.log` into this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = env::var("BINDER_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            config.level = level;
        }

        config.log_dir = env::var("BINDER_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
