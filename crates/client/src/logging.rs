//! File-based logging for the TUI binaries.
//!
//! The terminal is owned by ratatui, so log output goes to a file under
//! the user's cache directory; tail it from another shell to watch the
//! runtime work.

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize logging to `<cache>/fable/logs/<app>.log`.
///
/// The returned guard must be held for the life of the process or late
/// log lines are dropped.
pub fn init(app: &str) -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, format!("{app}.log"));
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!(app, log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

fn log_directory() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fable").join("logs")
}
