//! Sequential NPC fights with a fixed pause between them.
//!
//! Each fight is a single request resolved server-side. The loop never
//! retries: a failed request ends the run with [`StopReason::Failed`].
use std::sync::Arc;

use client_api::{GameApi, NpcBattleResult};
use tokio::sync::mpsc;

use crate::config::AutoBattleConfig;
use crate::error::{Result, SessionError};

/// Why an auto-battle run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every requested fight was fought.
    Completed,
    /// The player lost a fight.
    Defeated,
    /// The server reported no energy left.
    OutOfEnergy,
    /// A request failed; carries the user-facing message.
    Failed(String),
}

/// Progress report emitted after every fight.
#[derive(Clone, Debug)]
pub struct AutoBattleProgress {
    /// 1-based fight number.
    pub fight: u32,
    pub total: u32,
    pub result: NpcBattleResult,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoBattleSummary {
    pub fights: u32,
    pub wins: u32,
    pub gold: u32,
    pub xp: u32,
    pub stop: StopReason,
}

impl AutoBattleSummary {
    fn new() -> Self {
        Self {
            fights: 0,
            wins: 0,
            gold: 0,
            xp: 0,
            stop: StopReason::Completed,
        }
    }

    fn record(&mut self, result: &NpcBattleResult) {
        self.fights += 1;
        if result.won {
            self.wins += 1;
        }
        self.gold = self.gold.saturating_add(result.gold_earned);
        self.xp = self.xp.saturating_add(result.xp_earned);
    }
}

pub struct AutoBattle {
    api: Arc<dyn GameApi>,
    npc_id: String,
    config: AutoBattleConfig,
}

impl AutoBattle {
    /// Fails with [`SessionError::MissingNpc`] when no NPC is configured.
    pub fn new(api: Arc<dyn GameApi>, config: AutoBattleConfig) -> Result<Self> {
        let npc_id = config.npc_id.clone().ok_or(SessionError::MissingNpc)?;
        Ok(Self {
            api,
            npc_id,
            config,
        })
    }

    pub fn npc_id(&self) -> &str {
        &self.npc_id
    }

    /// Fight until the count is reached, the player loses, energy runs out
    /// or a request fails.
    pub async fn run(&self, progress: Option<mpsc::Sender<AutoBattleProgress>>) -> AutoBattleSummary {
        let total = self.config.count;
        let mut summary = AutoBattleSummary::new();

        tracing::info!(npc = %self.npc_id, total, "auto-battle started");

        for fight in 1..=total {
            if fight > 1 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            let result = match self.api.fight_npc(&self.npc_id).await {
                Ok(result) => result,
                Err(error) => {
                    tracing::warn!(npc = %self.npc_id, fight, %error, "auto-battle request failed");
                    summary.stop = StopReason::Failed(error.user_message());
                    break;
                }
            };

            summary.record(&result);
            tracing::debug!(
                fight,
                won = result.won,
                gold = result.gold_earned,
                xp = result.xp_earned,
                "auto-battle fight resolved"
            );

            if let Some(tx) = &progress
                && tx
                    .send(AutoBattleProgress {
                        fight,
                        total,
                        result: result.clone(),
                    })
                    .await
                    .is_err()
            {
                tracing::trace!("auto-battle progress receiver dropped");
            }

            if !result.won {
                summary.stop = StopReason::Defeated;
                break;
            }
            if result.energy_remaining == Some(0) {
                summary.stop = StopReason::OutOfEnergy;
                break;
            }
        }

        tracing::info!(
            fights = summary.fights,
            wins = summary.wins,
            gold = summary.gold,
            xp = summary.xp,
            stop = ?summary.stop,
            "auto-battle finished"
        );
        summary
    }
}
