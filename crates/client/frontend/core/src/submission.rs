//! One-submission-per-round guard for combat actions.
use combat_core::{CombatState, CombatStatus, Side};
use thiserror::Error;

/// Where the player stands in the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// Input enabled.
    #[default]
    Ready,
    /// Request for `round` in flight.
    Submitting { round: u32 },
    /// Server accepted an action for `round`; waiting for the next round.
    AwaitingRound { round: u32 },
    /// Combat finished; input stays disabled.
    Closed,
}

/// Reason a submission was refused locally.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GateRejection {
    #[error("no combat loaded yet")]
    NoCombat,
    #[error("an action is already being submitted")]
    InFlight,
    #[error("you already acted this round")]
    AlreadySubmitted,
    #[error("the round is resolving")]
    RoundResolving,
    #[error("the combat is over")]
    Finished,
    #[error("you are only watching this fight")]
    Spectating,
}

/// Tracks the latest snapshot and the player's own submissions.
#[derive(Clone, Debug, Default)]
pub struct SubmissionGate {
    state: GateState,
    round: Option<u32>,
    status: CombatStatus,
    /// Server already recorded an action for us this round.
    server_has_action: bool,
    /// Local player is not one of the fighters.
    spectating: bool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Feed a normalized snapshot; `me` is the side controlled by this
    /// client, `None` when only spectating. Snapshots from an earlier round
    /// than the last one seen are ignored.
    pub fn observe(&mut self, snapshot: &CombatState, me: Option<Side>) {
        if self.state == GateState::Closed {
            return;
        }
        if self.round.is_some_and(|round| snapshot.round < round) {
            return;
        }
        if snapshot.is_finished() {
            self.close();
            return;
        }

        self.round = Some(snapshot.round);
        self.status = snapshot.status;
        self.spectating = me.is_none();
        self.server_has_action =
            me.is_some_and(|side| snapshot.fighter(side).action.is_some());

        match self.state {
            GateState::AwaitingRound { round } if snapshot.round > round => {
                tracing::debug!(round = snapshot.round, "new round, input re-enabled");
                self.state = GateState::Ready;
            }
            _ => {}
        }
    }

    /// Why a submission would be refused right now, if it would.
    pub fn check(&self) -> Result<u32, GateRejection> {
        match self.state {
            GateState::Closed => return Err(GateRejection::Finished),
            GateState::Submitting { .. } => return Err(GateRejection::InFlight),
            GateState::AwaitingRound { .. } => return Err(GateRejection::AlreadySubmitted),
            GateState::Ready => {}
        }

        let round = self.round.ok_or(GateRejection::NoCombat)?;
        if self.spectating {
            return Err(GateRejection::Spectating);
        }
        if self.status != CombatStatus::Waiting {
            return Err(GateRejection::RoundResolving);
        }
        if self.server_has_action {
            return Err(GateRejection::AlreadySubmitted);
        }
        Ok(round)
    }

    pub fn can_submit(&self) -> bool {
        self.check().is_ok()
    }

    /// Enter `Submitting` for the current round.
    pub fn begin(&mut self) -> Result<u32, GateRejection> {
        let round = self.check()?;
        self.state = GateState::Submitting { round };
        Ok(round)
    }

    /// The server accepted the in-flight action.
    pub fn accepted(&mut self) {
        if let GateState::Submitting { round } = self.state {
            self.state = match self.round {
                Some(current) if current > round => GateState::Ready,
                _ => GateState::AwaitingRound { round },
            };
        }
    }

    /// The in-flight action failed; input is enabled again.
    pub fn rejected(&mut self) {
        if let GateState::Submitting { .. } = self.state {
            self.state = GateState::Ready;
        }
    }

    pub fn close(&mut self) {
        self.state = GateState::Closed;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
