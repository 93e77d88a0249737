//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;
use std::time::Duration;

/// Frontend-specific configuration.
///
/// This contains UI-related settings like message capacity, toast lifetime
/// and the timings of transient combat effects.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
    pub effects: EffectConfig,
}

impl FrontendConfig {
    pub const fn new(messages: MessageConfig, effects: EffectConfig) -> Self {
        Self { messages, effects }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `TOAST_DURATION_MS` - Toast lifetime (default: 4000)
    /// - `SHOW_FLOATING_NUMBERS` - Spawn damage/heal numbers (default: true)
    /// - `SHOW_SCREEN_SHAKE` - Shake and flash damaged fighters (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("CLI_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }
        if let Some(ms) = read_env::<u64>("TOAST_DURATION_MS") {
            config.messages.toast_duration = Duration::from_millis(ms.max(100));
        }

        if let Some(show) = read_env_bool("SHOW_FLOATING_NUMBERS") {
            config.effects.visibility.show_floating_numbers = show;
        }
        if let Some(show) = read_env_bool("SHOW_SCREEN_SHAKE") {
            config.effects.visibility.show_screen_shake = show;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    /// How long a toast stays on screen.
    pub toast_duration: Duration,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            toast_duration: Duration::from_millis(4000),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EffectConfig {
    pub visibility: EffectVisibility,
    pub timings: EffectTimings,
}

/// Controls which transient effects are spawned.
///
/// Message log entries are always written; this only filters animations.
#[derive(Clone, Debug)]
pub struct EffectVisibility {
    /// Floating `-12` / `+5` numbers over the fighters.
    pub show_floating_numbers: bool,
    /// Shake on damage and crit flash.
    pub show_screen_shake: bool,
}

impl Default for EffectVisibility {
    fn default() -> Self {
        Self {
            show_floating_numbers: true,
            show_screen_shake: true,
        }
    }
}

/// Fixed lifetimes of the combat screen effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectTimings {
    pub floating_number: Duration,
    pub shake: Duration,
    pub crit_flash: Duration,
    /// Delay before the outcome screen when the end was seen by polling.
    pub outcome_delay: Duration,
    /// How long the outcome screen stays before completion.
    pub outcome_display: Duration,
}

impl Default for EffectTimings {
    fn default() -> Self {
        Self {
            floating_number: Duration::from_millis(1200),
            shake: Duration::from_millis(500),
            crit_flash: Duration::from_millis(400),
            outcome_delay: Duration::from_millis(800),
            outcome_display: Duration::from_secs(4),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings() {
        let timings = EffectTimings::default();
        assert_eq!(timings.floating_number, Duration::from_millis(1200));
        assert_eq!(timings.shake, Duration::from_millis(500));
        assert_eq!(timings.crit_flash, Duration::from_millis(400));
        assert_eq!(timings.outcome_delay, Duration::from_millis(800));
        assert_eq!(timings.outcome_display, Duration::from_secs(4));
    }

    #[test]
    fn default_messages() {
        let config = FrontendConfig::default();
        assert_eq!(config.messages.capacity, 64);
        assert_eq!(config.messages.toast_duration, Duration::from_secs(4));
        assert!(config.effects.visibility.show_floating_numbers);
    }
}
