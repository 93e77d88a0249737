//! In-memory game server for tests.
//!
//! Responses are scripted per endpoint. Each queue replays its entries in
//! order and keeps returning the last one once drained, which mirrors a
//! server whose state stops changing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use combat_core::{CombatActionKind, CombatState};

use crate::error::{ApiError, Result};
use crate::traits::GameApi;
use crate::types::{CombatActionResponse, EnergyStatus, NpcBattleResult, WorldTime};

/// Scripted failure returned as [`ApiError::Status`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockFailure {
    pub status: u16,
    pub message: String,
}

impl MockFailure {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

type Scripted<T> = std::result::Result<T, MockFailure>;

#[derive(Debug)]
struct Script<T> {
    queue: VecDeque<Scripted<T>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    fn push(&mut self, entry: Scripted<T>) {
        self.queue.push_back(entry);
    }

    fn next(&mut self, endpoint: &str) -> Result<T> {
        let entry = if self.queue.len() > 1 {
            self.queue.pop_front()
        } else {
            self.queue.front().cloned()
        };

        match entry {
            Some(Ok(value)) => Ok(value),
            Some(Err(failure)) => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: failure.status,
                message: failure.message,
            }),
            None => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 404,
                message: format!("no scripted response for {}", endpoint),
            }),
        }
    }
}

#[derive(Debug)]
struct MockState {
    combat: Script<CombatState>,
    actions: Script<CombatActionResponse>,
    world_time: Script<WorldTime>,
    energy: Script<EnergyStatus>,
    battles: Script<NpcBattleResult>,
    submitted: Vec<(String, CombatActionKind)>,
    combat_fetches: usize,
    battle_requests: usize,
}

/// Mock game server for testing without network.
#[derive(Clone)]
pub struct MockGameApi {
    state: Arc<Mutex<MockState>>,
}

impl MockGameApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                combat: Script::new(),
                actions: Script::new(),
                world_time: Script::new(),
                energy: Script::new(),
                battles: Script::new(),
                submitted: Vec::new(),
                combat_fetches: 0,
                battle_requests: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_combat(&self, state: CombatState) -> &Self {
        self.lock().combat.push(Ok(state));
        self
    }

    pub fn push_combat_failure(&self, failure: MockFailure) -> &Self {
        self.lock().combat.push(Err(failure));
        self
    }

    pub fn push_action_response(&self, response: CombatActionResponse) -> &Self {
        self.lock().actions.push(Ok(response));
        self
    }

    pub fn push_action_failure(&self, failure: MockFailure) -> &Self {
        self.lock().actions.push(Err(failure));
        self
    }

    pub fn push_world_time(&self, time: WorldTime) -> &Self {
        self.lock().world_time.push(Ok(time));
        self
    }

    pub fn push_energy(&self, energy: EnergyStatus) -> &Self {
        self.lock().energy.push(Ok(energy));
        self
    }

    pub fn push_battle(&self, result: NpcBattleResult) -> &Self {
        self.lock().battles.push(Ok(result));
        self
    }

    pub fn push_battle_failure(&self, failure: MockFailure) -> &Self {
        self.lock().battles.push(Err(failure));
        self
    }

    /// Actions received so far, in submission order.
    pub fn submitted_actions(&self) -> Vec<(String, CombatActionKind)> {
        self.lock().submitted.clone()
    }

    pub fn combat_fetches(&self) -> usize {
        self.lock().combat_fetches
    }

    pub fn battle_requests(&self) -> usize {
        self.lock().battle_requests
    }
}

impl Default for MockGameApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameApi for MockGameApi {
    async fn fetch_combat(&self, challenge_id: &str) -> Result<CombatState> {
        let mut state = self.lock();
        state.combat_fetches += 1;
        state
            .combat
            .next(&format!("/api/challenges/{}/combat", challenge_id))
    }

    async fn submit_combat_action(
        &self,
        challenge_id: &str,
        action: CombatActionKind,
    ) -> Result<CombatActionResponse> {
        let mut state = self.lock();
        let result = state
            .actions
            .next(&format!("/api/challenges/{}/combat-action", challenge_id));
        if result.is_ok() {
            state.submitted.push((challenge_id.to_string(), action));
        }
        result
    }

    async fn fetch_world_time(&self) -> Result<WorldTime> {
        self.lock().world_time.next("/api/world-time")
    }

    async fn fetch_energy(&self) -> Result<EnergyStatus> {
        self.lock().energy.next("/api/energy")
    }

    async fn fight_npc(&self, npc_id: &str) -> Result<NpcBattleResult> {
        let mut state = self.lock();
        state.battle_requests += 1;
        state.battles.next(&format!("/api/npcs/{}/battle", npc_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::FighterState;

    fn combat(round: u32) -> CombatState {
        CombatState::new(
            round,
            FighterState::new("a", 10, 10),
            FighterState::new("b", 10, 10),
        )
    }

    #[tokio::test]
    async fn replays_queue_then_sticks_to_last() {
        let api = MockGameApi::new();
        api.push_combat(combat(1)).push_combat(combat(2));

        assert_eq!(api.fetch_combat("c").await.unwrap().round, 1);
        assert_eq!(api.fetch_combat("c").await.unwrap().round, 2);
        assert_eq!(api.fetch_combat("c").await.unwrap().round, 2);
        assert_eq!(api.combat_fetches(), 3);
    }

    #[tokio::test]
    async fn unscripted_endpoint_fails() {
        let api = MockGameApi::new();
        let error = api.fetch_energy().await.unwrap_err();
        assert_eq!(error.status(), Some(404));
    }

    #[tokio::test]
    async fn failed_submission_is_not_recorded() {
        let api = MockGameApi::new();
        api.push_action_failure(MockFailure::new(409, "Already acted"))
            .push_action_response(CombatActionResponse::default());

        let error = api
            .submit_combat_action("c", CombatActionKind::Attack)
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "Already acted");

        api.submit_combat_action("c", CombatActionKind::Defend)
            .await
            .unwrap();
        assert_eq!(
            api.submitted_actions(),
            vec![("c".to_string(), CombatActionKind::Defend)]
        );
    }
}
