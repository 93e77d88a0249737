//! Request and response payloads of the game server.
//!
//! Combat snapshots live in `combat-core`; this module holds the rest.
use combat_core::{CombatActionKind, CombatState};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/challenges/:id/combat-action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatActionRequest {
    pub action: CombatActionKind,
}

/// Reply to a combat action.
///
/// When the submission resolved the round the server embeds the new state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatActionResponse {
    pub combat: Option<CombatState>,
    pub message: Option<String>,
}

/// In-game clock shown in the header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldTime {
    pub hour: u8,
    pub minute: u8,
    /// Server label such as `dawn`, `day`, `dusk`, `night`.
    pub period: String,
    pub weather: Option<String>,
}

impl WorldTime {
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyStatus {
    pub current: u32,
    pub max: u32,
    #[serde(default)]
    pub next_regen_seconds: Option<u32>,
}

impl EnergyStatus {
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Outcome of one NPC fight (resolved entirely server-side).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NpcBattleResult {
    pub won: bool,
    pub gold_earned: u32,
    pub xp_earned: u32,
    pub energy_remaining: Option<u32>,
    pub message: Option<String>,
}
