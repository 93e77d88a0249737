//! Connection settings for the game server.
use std::env;
use std::time::Duration;

/// REST endpoint configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token: None,
            timeout: Duration::from_millis(10_000),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_API_URL` - Server base URL (default: http://localhost:5000)
    /// - `ARENA_API_TOKEN` - Bearer token sent with every request (default: none)
    /// - `ARENA_HTTP_TIMEOUT_MS` - Per-request timeout (default: 10000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("ARENA_API_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url.trim().to_string();
        }

        config.token = env::var("ARENA_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        if let Some(ms) = read_env::<u64>("ARENA_HTTP_TIMEOUT_MS") {
            config.timeout = Duration::from_millis(ms.max(1));
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
