//! Victory/defeat screen timing and the completion callback.
//!
//! ```text
//! Hidden --trigger(polling)--> Pending --800ms--> Showing --4s--> Completed
//! Hidden --trigger(response)-------------------> Showing --4s--> Completed
//! ```
use std::fmt;
use std::time::Instant;

use combat_core::CombatState;

use crate::config::EffectTimings;

/// Final result from this client's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

impl CombatOutcome {
    /// Victory iff the declared winner is the current player.
    pub fn decide(state: &CombatState, player_id: Option<&str>) -> Self {
        match player_id {
            Some(id) if state.is_winner(id) => CombatOutcome::Victory,
            _ => CombatOutcome::Defeat,
        }
    }
}

/// Path through which the end of the fight was learned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeSource {
    /// A polled snapshot; the screen is delayed.
    Polling,
    /// The resolved state embedded in the action response; shown at once.
    ActionResponse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomePhase {
    Hidden,
    Pending {
        outcome: CombatOutcome,
        show_at: Instant,
    },
    Showing {
        outcome: CombatOutcome,
        until: Instant,
    },
    Completed(CombatOutcome),
}

/// Invoked once after the outcome screen was displayed.
pub type CompletionCallback = Box<dyn FnOnce(CombatOutcome) + Send>;

pub struct OutcomeTimer {
    phase: OutcomePhase,
    timings: EffectTimings,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for OutcomeTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeTimer")
            .field("phase", &self.phase)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

impl OutcomeTimer {
    pub fn new(timings: EffectTimings) -> Self {
        Self {
            phase: OutcomePhase::Hidden,
            timings,
            on_complete: None,
        }
    }

    /// Add a completion callback. Callbacks run in registration order.
    pub fn set_on_complete(&mut self, callback: CompletionCallback) {
        self.on_complete = Some(match self.on_complete.take() {
            Some(earlier) => Box::new(move |outcome| {
                earlier(outcome);
                callback(outcome);
            }),
            None => callback,
        });
    }

    pub fn phase(&self) -> OutcomePhase {
        self.phase
    }

    /// Start the outcome sequence. Later triggers are ignored, except that a
    /// direct response cuts a pending delay short.
    pub fn trigger(&mut self, outcome: CombatOutcome, source: OutcomeSource, now: Instant) -> bool {
        match (self.phase, source) {
            (OutcomePhase::Hidden, OutcomeSource::Polling) => {
                self.phase = OutcomePhase::Pending {
                    outcome,
                    show_at: now + self.timings.outcome_delay,
                };
            }
            (OutcomePhase::Hidden, OutcomeSource::ActionResponse)
            | (OutcomePhase::Pending { .. }, OutcomeSource::ActionResponse) => {
                self.phase = OutcomePhase::Showing {
                    outcome,
                    until: now + self.timings.outcome_display,
                };
            }
            _ => return false,
        }
        tracing::info!(%outcome, ?source, "combat outcome scheduled");
        true
    }

    /// Advance timers. Returns `true` when the visible phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let OutcomePhase::Pending { outcome, show_at } = self.phase
            && now >= show_at
        {
            self.phase = OutcomePhase::Showing {
                outcome,
                until: show_at + self.timings.outcome_display,
            };
            changed = true;
        }

        if let OutcomePhase::Showing { outcome, until } = self.phase
            && now >= until
        {
            self.phase = OutcomePhase::Completed(outcome);
            if let Some(callback) = self.on_complete.take() {
                callback(outcome);
            }
            changed = true;
        }

        changed
    }

    /// Outcome currently on screen.
    pub fn visible(&self) -> Option<CombatOutcome> {
        match self.phase {
            OutcomePhase::Showing { outcome, .. } | OutcomePhase::Completed(outcome) => {
                Some(outcome)
            }
            OutcomePhase::Hidden | OutcomePhase::Pending { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, OutcomePhase::Completed(_))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            OutcomePhase::Pending { show_at, .. } => Some(show_at),
            OutcomePhase::Showing { until, .. } => Some(until),
            OutcomePhase::Hidden | OutcomePhase::Completed(_) => None,
        }
    }

    /// Cancel a pending sequence without running the callback.
    pub fn clear(&mut self) {
        if !self.is_complete() {
            self.phase = OutcomePhase::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatStatus, FighterState};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn finished(winner: &str) -> CombatState {
        let mut state = CombatState::new(
            7,
            FighterState::new("me", 20, 100),
            FighterState::new("foe", 0, 100),
        );
        state.status = CombatStatus::Finished;
        state.winner_id = Some(winner.to_string());
        state
    }

    fn counting_timer() -> (OutcomeTimer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut timer = OutcomeTimer::new(EffectTimings::default());
        let counter = Arc::clone(&calls);
        timer.set_on_complete(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        (timer, calls)
    }

    #[test]
    fn victory_iff_winner_is_current_player() {
        assert_eq!(
            CombatOutcome::decide(&finished("me"), Some("me")),
            CombatOutcome::Victory
        );
        assert_eq!(
            CombatOutcome::decide(&finished("foe"), Some("me")),
            CombatOutcome::Defeat
        );
        assert_eq!(CombatOutcome::decide(&finished("me"), None), CombatOutcome::Defeat);
    }

    #[test]
    fn polling_path_waits_800ms() {
        let now = Instant::now();
        let (mut timer, _) = counting_timer();
        timer.trigger(CombatOutcome::Victory, OutcomeSource::Polling, now);

        timer.tick(now + Duration::from_millis(799));
        assert_eq!(timer.visible(), None);

        assert!(timer.tick(now + Duration::from_millis(800)));
        assert_eq!(timer.visible(), Some(CombatOutcome::Victory));
    }

    #[test]
    fn response_path_shows_immediately() {
        let now = Instant::now();
        let (mut timer, _) = counting_timer();
        timer.trigger(CombatOutcome::Defeat, OutcomeSource::ActionResponse, now);
        assert_eq!(timer.visible(), Some(CombatOutcome::Defeat));
    }

    #[test]
    fn response_cuts_pending_delay_short() {
        let now = Instant::now();
        let (mut timer, _) = counting_timer();
        timer.trigger(CombatOutcome::Victory, OutcomeSource::Polling, now);
        assert!(timer.trigger(
            CombatOutcome::Victory,
            OutcomeSource::ActionResponse,
            now + Duration::from_millis(100)
        ));
        assert_eq!(timer.visible(), Some(CombatOutcome::Victory));
        assert!(!timer.trigger(CombatOutcome::Defeat, OutcomeSource::Polling, now));
    }

    #[test]
    fn callback_runs_once_after_display() {
        let now = Instant::now();
        let (mut timer, calls) = counting_timer();
        timer.trigger(CombatOutcome::Victory, OutcomeSource::ActionResponse, now);

        timer.tick(now + Duration::from_millis(3999));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        timer.tick(now + Duration::from_secs(4));
        timer.tick(now + Duration::from_secs(10));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(timer.is_complete());
        assert_eq!(timer.next_deadline(), None);
    }

    #[test]
    fn polling_path_completes_after_delay_plus_display() {
        let now = Instant::now();
        let (mut timer, calls) = counting_timer();
        timer.trigger(CombatOutcome::Defeat, OutcomeSource::Polling, now);

        // A late tick catches up through both phases.
        timer.tick(now + Duration::from_millis(4800));
        assert!(timer.is_complete());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn later_callbacks_are_chained() {
        let now = Instant::now();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut timer = OutcomeTimer::new(EffectTimings::default());
        for tag in ["first", "second"] {
            let sink = Arc::clone(&order);
            timer.set_on_complete(Box::new(move |_| sink.lock().unwrap().push(tag)));
        }

        timer.trigger(CombatOutcome::Victory, OutcomeSource::ActionResponse, now);
        timer.tick(now + Duration::from_secs(4));
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn clear_cancels_without_callback() {
        let now = Instant::now();
        let (mut timer, calls) = counting_timer();
        timer.trigger(CombatOutcome::Victory, OutcomeSource::Polling, now);
        timer.clear();
        timer.tick(now + Duration::from_secs(10));
        assert_eq!(timer.phase(), OutcomePhase::Hidden);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
