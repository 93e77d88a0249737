//! Transport abstraction over the game server.
use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{CombatActionKind, CombatState};

use crate::error::Result;
use crate::types::{CombatActionResponse, EnergyStatus, NpcBattleResult, WorldTime};

/// Game server operations the client depends on.
///
/// All game rules run behind this trait. Implementations only move JSON.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `GET /api/challenges/:id/combat`
    async fn fetch_combat(&self, challenge_id: &str) -> Result<CombatState>;

    /// `POST /api/challenges/:id/combat-action`
    async fn submit_combat_action(
        &self,
        challenge_id: &str,
        action: CombatActionKind,
    ) -> Result<CombatActionResponse>;

    /// `GET /api/world-time`
    async fn fetch_world_time(&self) -> Result<WorldTime>;

    /// `GET /api/energy`
    async fn fetch_energy(&self) -> Result<EnergyStatus>;

    /// `POST /api/npcs/:id/battle`
    async fn fight_npc(&self, npc_id: &str) -> Result<NpcBattleResult>;
}

#[async_trait]
impl<T> GameApi for Arc<T>
where
    T: GameApi + ?Sized,
{
    async fn fetch_combat(&self, challenge_id: &str) -> Result<CombatState> {
        (**self).fetch_combat(challenge_id).await
    }

    async fn submit_combat_action(
        &self,
        challenge_id: &str,
        action: CombatActionKind,
    ) -> Result<CombatActionResponse> {
        (**self).submit_combat_action(challenge_id, action).await
    }

    async fn fetch_world_time(&self) -> Result<WorldTime> {
        (**self).fetch_world_time().await
    }

    async fn fetch_energy(&self) -> Result<EnergyStatus> {
        (**self).fetch_energy().await
    }

    async fn fight_npc(&self, npc_id: &str) -> Result<NpcBattleResult> {
        (**self).fight_npc(npc_id).await
    }
}
