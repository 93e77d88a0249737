//! Session configuration structures and loaders.
use std::env;
use std::time::Duration;

/// Settings for one client session against the game server.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Challenge whose combat is polled. Combat feed is disabled when unset.
    pub challenge_id: Option<String>,
    /// Player controlled by this client; decides victory vs. defeat.
    pub player_id: Option<String>,
    pub polling: PollIntervals,
    /// Capacity of the session event bus.
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            challenge_id: None,
            player_id: None,
            polling: PollIntervals::default(),
            event_buffer: 64,
        }
    }
}

impl SessionConfig {
    pub fn for_challenge(challenge_id: impl Into<String>, player_id: impl Into<String>) -> Self {
        Self {
            challenge_id: Some(challenge_id.into()),
            player_id: Some(player_id.into()),
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_CHALLENGE_ID` - Challenge to follow (default: none)
    /// - `ARENA_PLAYER_ID` - Current player id (default: none)
    /// - `COMBAT_POLL_MS` - Combat poll interval (default: 3000)
    /// - `WORLD_TIME_POLL_MS` - World clock poll interval, 0 disables (default: 15000)
    /// - `ENERGY_POLL_MS` - Energy poll interval, 0 disables (default: 30000)
    /// - `SESSION_EVENT_BUFFER` - Event bus capacity (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.challenge_id = read_env_string("ARENA_CHALLENGE_ID");
        config.player_id = read_env_string("ARENA_PLAYER_ID");

        if let Some(ms) = read_env::<u64>("COMBAT_POLL_MS") {
            config.polling.combat = Duration::from_millis(ms.max(100));
        }
        if let Some(ms) = read_env::<u64>("WORLD_TIME_POLL_MS") {
            config.polling.world_time = optional_interval(ms);
        }
        if let Some(ms) = read_env::<u64>("ENERGY_POLL_MS") {
            config.polling.energy = optional_interval(ms);
        }
        if let Some(capacity) = read_env::<usize>("SESSION_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

/// Fixed cadence of every polled feed.
#[derive(Clone, Debug)]
pub struct PollIntervals {
    pub combat: Duration,
    pub world_time: Option<Duration>,
    pub energy: Option<Duration>,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            combat: Duration::from_secs(3),
            world_time: Some(Duration::from_secs(15)),
            energy: Some(Duration::from_secs(30)),
        }
    }
}

/// Settings for the sequential NPC fight loop.
#[derive(Clone, Debug)]
pub struct AutoBattleConfig {
    pub npc_id: Option<String>,
    pub count: u32,
    /// Pause between two consecutive fights.
    pub delay: Duration,
}

impl Default for AutoBattleConfig {
    fn default() -> Self {
        Self {
            npc_id: None,
            count: 10,
            delay: Duration::from_millis(1500),
        }
    }
}

impl AutoBattleConfig {
    /// Environment variables:
    /// - `AUTO_BATTLE_NPC_ID` - NPC to fight; enables auto-battle mode (default: none)
    /// - `AUTO_BATTLE_COUNT` - Maximum fights (default: 10)
    /// - `AUTO_BATTLE_DELAY_MS` - Delay between fights (default: 1500)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.npc_id = read_env_string("AUTO_BATTLE_NPC_ID");
        if let Some(count) = read_env::<u32>("AUTO_BATTLE_COUNT") {
            config.count = count;
        }
        if let Some(ms) = read_env::<u64>("AUTO_BATTLE_DELAY_MS") {
            config.delay = Duration::from_millis(ms);
        }

        config
    }
}

fn optional_interval(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms.max(100)))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_matches_server_expectations() {
        let polling = PollIntervals::default();
        assert_eq!(polling.combat, Duration::from_secs(3));
        assert_eq!(polling.world_time, Some(Duration::from_secs(15)));
        assert_eq!(polling.energy, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_interval_disables_feed() {
        assert_eq!(optional_interval(0), None);
        assert_eq!(optional_interval(20), Some(Duration::from_millis(100)));
    }
}
