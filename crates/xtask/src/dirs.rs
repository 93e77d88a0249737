//! Where the arena client leaves its session logs.
//!
//! The layout mirrors the client's logging setup:
//! `<cache>/arena/logs/<session>/client.log`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File written by the client inside each session directory.
pub const LOG_FILE: &str = "client.log";

/// One session directory under the log root.
#[derive(Debug, Clone)]
pub struct LogSession {
    pub id: String,
    pub dir: PathBuf,
    modified: SystemTime,
}

impl LogSession {
    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }
}

/// Log root of the arena client.
///
/// - macOS: `~/Library/Caches/arena/logs`
/// - Linux: `~/.cache/arena/logs` (or `$XDG_CACHE_HOME/arena/logs`)
/// - Windows: `%LOCALAPPDATA%\arena\logs`
/// - Fallback: `/tmp/arena/logs`
pub fn log_dir() -> Result<PathBuf> {
    let cache = directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena"));

    Ok(cache.join("logs"))
}

/// Session directories, newest first. A missing root has no sessions.
pub fn list_sessions(log_dir: &Path) -> Result<Vec<LogSession>> {
    if !log_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(log_dir)
        .with_context(|| format!("Failed to read log directory: {}", log_dir.display()))?;

    let mut sessions = Vec::new();
    for entry in entries {
        let entry = entry?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Some(id) = dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        sessions.push(LogSession {
            id: id.to_string(),
            modified: entry.metadata()?.modified()?,
            dir: dir.clone(),
        });
    }

    sessions.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(sessions)
}

/// Log file of `session_id`; errors when the client never wrote one.
pub fn find_session_log(log_dir: &Path, session_id: &str) -> Result<PathBuf> {
    let path = log_dir.join(session_id).join(LOG_FILE);
    if !path.exists() {
        anyhow::bail!("Log file not found: {}", path.display());
    }
    Ok(path)
}

/// Newest session and its log file.
pub fn find_latest_log(log_dir: &Path) -> Result<(String, PathBuf)> {
    let latest = list_sessions(log_dir)?
        .into_iter()
        .next()
        .context("No sessions found in log directory")?;

    let path = latest.log_file();
    if !path.exists() {
        anyhow::bail!("Log file not found for latest session: {}", path.display());
    }
    Ok((latest.id, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_log_dir_has_no_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = list_sessions(&dir.path().join("logs")).unwrap();
        assert!(sessions.is_empty());
        assert!(find_latest_log(&dir.path().join("logs")).is_err());
    }

    #[test]
    fn finds_session_log() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("session_1");
        std::fs::create_dir_all(&session).unwrap();
        std::fs::write(session.join(LOG_FILE), "hello\n").unwrap();
        std::fs::write(dir.path().join("stray.txt"), "").unwrap();

        let sessions = list_sessions(dir.path()).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "session_1");

        let path = find_session_log(dir.path(), "session_1").unwrap();
        assert!(path.ends_with("session_1/client.log"));

        let (latest, _) = find_latest_log(dir.path()).unwrap();
        assert_eq!(latest, "session_1");

        assert!(find_session_log(dir.path(), "session_2").is_err());
    }

    #[test]
    fn session_without_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("session_9")).unwrap();
        assert!(find_latest_log(dir.path()).is_err());
    }
}
