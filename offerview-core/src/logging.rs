//! File logging for the offerview binaries.
//!
//! The TUI draws on stdout, so log lines only ever go to
//! `$XDG_STATE_HOME/offerview/offerview.log.<date>`.

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "offerview.log";

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. One file per day is
/// written and at most `config.max_files` are kept. Hold on to the returned
/// guard until exit or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(daily_appender(&log_dir, config)?);

    tracing_subscriber::registry()
        .with(level_filter(config))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        max_files = config.max_files,
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

fn daily_appender(dir: &Path, config: &LoggingConfig) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(config.max_files.max(1))
        .build(dir)
        .map_err(|e| Error::Config(format!("failed to open log file in {}: {}", dir.display(), e)))
}

fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Subscriber for unit tests; output is captured by the test harness.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Flushes the background log writer when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Base path of the log file; rotated files get a date suffix.
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}
