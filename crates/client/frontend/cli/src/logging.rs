//! File-only tracing setup for the terminal client.
//!
//! The TUI owns stdout/stderr, so logs go to
//! `<cache>/arena/logs/<session>/client.log`. Follow them with
//! `cargo xtask tail-logs`.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform log directory shared with `xtask`.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena"))
        .join("logs")
}

/// Session directory name: the given id or `session_<unix secs>`.
pub fn session_name(session_id: Option<&str>) -> String {
    match session_id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{}", secs)
        }
    }
}

/// Install the global subscriber writing to the session log file.
///
/// Returns the session log directory.
pub fn setup_logging(session_id: Option<&str>) -> Result<PathBuf> {
    let session = session_name(session_id);
    let session_log_dir = log_dir().join(&session);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // ANSI codes kept for colorized tail-logs
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    tracing::info!(session = %session, "Logging initialized");
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(session_log_dir)
}
