//! Shared logging utilities for Docintake binaries.
//!
//! Console output always goes to stderr so stdout stays free for summaries
//! and JSON reports. A daily-rolled log file is added when a log directory
//! is configured.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "docintake=info";
const VERBOSE_LOG_FILTER: &str = "docintake=debug";

/// Logging configuration shared by Docintake binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Directory for the rolling log file. Console only when `None`.
    pub log_dir: Option<&'a Path>,
}

/// File name prefix of the rolled log files (`<app>.log.YYYY-MM-DD`).
pub fn log_file_prefix(app_name: &str) -> String {
    format!("{}.log", app_name)
}

/// Initialize tracing with stderr output and an optional rolling file writer.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process.
pub fn init_logging(config: LogConfig<'_>) -> Result<Option<WorkerGuard>> {
    let mut guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_appender =
                tracing_appender::rolling::daily(dir, log_file_prefix(config.app_name));
            let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(worker_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_filter(build_filter(config.verbose)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(build_filter(config.verbose)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// `RUST_LOG` wins; otherwise fall back to the crate-scoped default.
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_LOG_FILTER)
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_prefix() {
        assert_eq!(log_file_prefix("docintake"), "docintake.log");
    }
}
