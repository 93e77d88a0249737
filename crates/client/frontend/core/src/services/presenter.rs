//! Combat screen state driven by session events.
//!
//! [`CombatPresenter`] owns the reconciler, the effect dispatcher, the
//! submission gate and the outcome timer. It is the single place that turns
//! [`SessionEvent`]s into presentation state; renderers only read
//! [`CombatViewModel`]s produced by it.
use std::time::Instant;

use client_api::{EnergyStatus, WorldTime};
use client_session::{Feed, SessionEvent};
use combat_core::{CombatActionKind, CombatEvent, CombatState, Reconciler, Side};

use crate::config::FrontendConfig;
use crate::effects::EffectDispatcher;
use crate::event::{EventConsumer, EventImpact};
use crate::message::{MessageEntry, MessageLevel, MessageLog, ToastQueue};
use crate::outcome::{CombatOutcome, CompletionCallback, OutcomeSource, OutcomeTimer};
use crate::submission::{GateRejection, GateState, SubmissionGate};
use crate::view_model::{CombatView, CombatViewModel, FighterView, HeaderView, orient};

/// Progress of one reconcile cycle.
///
/// `Idle -> AwaitingRound -> EventDetected -> EffectScheduled -> Idle`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum ReconcilePhase {
    #[default]
    Idle,
    AwaitingRound,
    EventDetected,
    EffectScheduled,
}

pub struct CombatPresenter {
    player_id: Option<String>,
    reconciler: Reconciler,
    effects: EffectDispatcher,
    gate: SubmissionGate,
    outcome: OutcomeTimer,
    log: MessageLog,
    toasts: ToastQueue,
    phase: ReconcilePhase,
    world_time: Option<WorldTime>,
    energy: Option<EnergyStatus>,
}

impl CombatPresenter {
    pub fn new(config: &FrontendConfig, player_id: Option<String>) -> Self {
        Self::with_log(config, player_id, MessageLog::new(config.messages.capacity))
    }

    pub fn with_log(config: &FrontendConfig, player_id: Option<String>, log: MessageLog) -> Self {
        Self {
            player_id,
            reconciler: Reconciler::new(),
            effects: EffectDispatcher::new(&config.effects),
            gate: SubmissionGate::new(),
            outcome: OutcomeTimer::new(config.effects.timings),
            log,
            toasts: ToastQueue::new(config.messages.toast_duration),
            phase: ReconcilePhase::Idle,
            world_time: None,
            energy: None,
        }
    }

    /// Register a callback invoked once the outcome screen has been shown.
    /// Earlier registrations still run, first.
    pub fn on_complete(&mut self, callback: CompletionCallback) {
        self.outcome.set_on_complete(callback);
    }

    pub fn phase(&self) -> ReconcilePhase {
        self.phase
    }

    pub fn gate(&self) -> GateState {
        self.gate.state()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome.visible()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.reconciler.previous()
    }

    pub fn effects(&self) -> &EffectDispatcher {
        &self.effects
    }

    /// Apply one session event observed at `now`.
    pub fn apply(&mut self, event: &SessionEvent, now: Instant) -> EventImpact {
        match event {
            SessionEvent::Combat(state) => {
                self.apply_snapshot(state.clone(), OutcomeSource::Polling, now)
            }
            SessionEvent::ActionAccepted {
                action,
                combat,
                message,
            } => {
                self.gate.accepted();
                self.log.push(MessageEntry::new(
                    format!("You chose {}.", action.label()),
                    self.round(),
                    MessageLevel::Info,
                ));
                if let Some(text) = message {
                    self.log
                        .push(MessageEntry::new(text.clone(), self.round(), MessageLevel::Info));
                }

                match combat {
                    Some(state) => {
                        self.apply_snapshot(state.clone(), OutcomeSource::ActionResponse, now);
                    }
                    None => self.settle_phase(),
                }
                EventImpact::redraw()
            }
            SessionEvent::ActionRejected { action, message } => {
                tracing::debug!(%action, message = message.as_str(), "action rejected");
                self.gate.rejected();
                self.settle_phase();
                self.notify(message.clone(), MessageLevel::Error, now);
                EventImpact::redraw()
            }
            SessionEvent::FetchFailed { feed, message } => {
                let level = match feed {
                    Feed::Combat => MessageLevel::Error,
                    Feed::WorldTime | Feed::Energy => MessageLevel::Warning,
                };
                self.notify(message.clone(), level, now);
                EventImpact::redraw()
            }
            SessionEvent::WorldTime(time) => {
                let changed = self.world_time.as_ref() != Some(time);
                self.world_time = Some(time.clone());
                EventImpact::from_changed(changed)
            }
            SessionEvent::Energy(energy) => {
                let changed = self.energy.as_ref() != Some(energy);
                self.energy = Some(*energy);
                EventImpact::from_changed(changed)
            }
        }
    }

    fn apply_snapshot(
        &mut self,
        snapshot: CombatState,
        source: OutcomeSource,
        now: Instant,
    ) -> EventImpact {
        let reconciliation = self.reconciler.observe(snapshot);
        if reconciliation.stale {
            return EventImpact::none();
        }
        let Some(current) = self.reconciler.previous().cloned() else {
            return EventImpact::none();
        };
        let round = Some(u64::from(current.round));
        let me = self.own_side(&current);

        for line in &reconciliation.new_log_lines {
            self.log
                .push(MessageEntry::new(line.clone(), round, MessageLevel::Info));
        }

        self.gate.observe(&current, me);

        if reconciliation.already_finished {
            let outcome = CombatOutcome::decide(&current, self.player_id.as_deref());
            self.outcome.trigger(outcome, OutcomeSource::Polling, now);
        }

        let mut scheduled = false;
        if !reconciliation.events.is_empty() {
            self.phase = ReconcilePhase::EventDetected;
            tracing::debug!(
                round = current.round,
                events = reconciliation.events.len(),
                "combat events detected"
            );

            for event in &reconciliation.events {
                scheduled |= self.effects.dispatch(event, now);
                self.describe(event, &current);

                if let CombatEvent::Finished { .. } = event {
                    let outcome = CombatOutcome::decide(&current, self.player_id.as_deref());
                    self.outcome.trigger(outcome, source, now);
                }
            }
        }

        if source == OutcomeSource::ActionResponse && current.is_finished() {
            let outcome = CombatOutcome::decide(&current, self.player_id.as_deref());
            self.outcome.trigger(outcome, source, now);
        }

        if scheduled && !self.effects.is_idle() {
            self.phase = ReconcilePhase::EffectScheduled;
        } else {
            self.settle_phase();
        }

        if reconciliation.is_empty() {
            EventImpact::none()
        } else {
            EventImpact::redraw()
        }
    }

    /// Log lines for events the server log does not spell out.
    fn describe(&mut self, event: &CombatEvent, state: &CombatState) {
        let round = Some(u64::from(state.round));
        match event {
            CombatEvent::RoundAdvanced { to, .. } => {
                self.log
                    .push(MessageEntry::new(format!("Round {} begins.", to), round, MessageLevel::Info));
            }
            CombatEvent::Fainted { side } => {
                let name = state.fighter(*side).display_name();
                self.log.push(MessageEntry::new(
                    format!("{} faints!", name),
                    round,
                    MessageLevel::Warning,
                ));
            }
            CombatEvent::Finished { winner_id } => {
                let text = match winner_id.as_deref().and_then(|id| state.side_of(id)) {
                    Some(side) => format!("{} wins the fight.", state.fighter(side).display_name()),
                    None => "The fight is over.".to_string(),
                };
                self.log.push(MessageEntry::new(text, round, MessageLevel::Info));
            }
            CombatEvent::Damaged { .. } | CombatEvent::Healed { .. } => {}
        }
    }

    /// Reserve the current round for `action`.
    ///
    /// On success the caller performs the request (e.g. through
    /// `SessionHandle::dispatch_action`). A refusal is surfaced as a toast.
    pub fn request_action(
        &mut self,
        action: CombatActionKind,
        now: Instant,
    ) -> Result<u32, GateRejection> {
        match self.gate.begin() {
            Ok(round) => {
                tracing::debug!(round, %action, "action reserved");
                self.phase = ReconcilePhase::AwaitingRound;
                Ok(round)
            }
            Err(rejection) => {
                self.notify(capitalize(&rejection.to_string()), MessageLevel::Warning, now);
                Err(rejection)
            }
        }
    }

    /// Advance every timer. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> EventImpact {
        let mut changed = self.effects.expire(now);
        changed |= self.toasts.expire(now);
        changed |= self.outcome.tick(now);

        if self.phase == ReconcilePhase::EffectScheduled && self.effects.is_idle() {
            self.settle_phase();
            changed = true;
        }
        EventImpact::from_changed(changed)
    }

    /// Earliest instant at which [`Self::tick`] would change anything.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.effects.next_deadline(),
            self.toasts.next_deadline(),
            self.outcome.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Drop every pending timer; the equivalent of leaving the screen.
    pub fn clear(&mut self) {
        self.effects.clear();
        self.toasts.clear();
        self.outcome.clear();
        self.phase = ReconcilePhase::Idle;
    }

    pub fn view_model(&self) -> CombatViewModel {
        let outcome = self.outcome.visible();
        let combat = self.reconciler.previous().map(|state| {
            let me = self.me_side(state);
            let is_spectator = self.own_side(state).is_none();

            CombatView {
                round: state.round,
                status: state.status,
                me: FighterView::new(state.fighter(me), me, &self.effects),
                opponent: FighterView::new(state.fighter(me.opposite()), me.opposite(), &self.effects),
                is_spectator,
                floating: orient(self.effects.floating_numbers(), me),
                last_log_line: state.last_log_line().map(str::to_string),
            }
        });

        CombatViewModel {
            header: HeaderView {
                world_time: self.world_time.clone(),
                energy: self.energy,
            },
            combat,
            outcome,
            actions_enabled: outcome.is_none() && self.gate.can_submit(),
            gate: self.gate.state(),
            phase: self.phase,
            toasts: self.toasts.iter().cloned().collect(),
        }
    }

    /// Side the local player fights on; `None` for spectators.
    fn own_side(&self, state: &CombatState) -> Option<Side> {
        self.player_id.as_deref().and_then(|id| state.side_of(id))
    }

    /// Side drawn as "me"; spectators see player one.
    fn me_side(&self, state: &CombatState) -> Side {
        self.own_side(state).unwrap_or(Side::Player1)
    }

    fn round(&self) -> Option<u64> {
        self.reconciler
            .previous()
            .map(|state| u64::from(state.round))
    }

    fn settle_phase(&mut self) {
        self.phase = match self.gate.state() {
            GateState::Submitting { .. } | GateState::AwaitingRound { .. } => {
                ReconcilePhase::AwaitingRound
            }
            GateState::Ready | GateState::Closed => ReconcilePhase::Idle,
        };
    }

    fn notify(&mut self, text: String, level: MessageLevel, now: Instant) {
        self.log
            .push(MessageEntry::new(text.clone(), self.round(), level));
        self.toasts.push(text, level, now);
    }
}

impl EventConsumer for CombatPresenter {
    fn on_event(&mut self, event: &SessionEvent) -> EventImpact {
        self.apply(event, Instant::now())
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::FloatColor;
    use combat_core::{CombatStatus, FighterState};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn snapshot(round: u32, me_hp: i32, foe_hp: i32) -> CombatState {
        CombatState::new(
            round,
            FighterState::new("me", me_hp, 100).with_name("Hero"),
            FighterState::new("foe", foe_hp, 100).with_name("Ogre"),
        )
    }

    fn presenter() -> CombatPresenter {
        CombatPresenter::new(&FrontendConfig::default(), Some("me".into()))
    }

    fn finished(winner: &str) -> CombatState {
        let mut state = snapshot(4, 30, 0);
        state.status = CombatStatus::Finished;
        state.winner_id = Some(winner.into());
        state
    }

    #[test]
    fn first_snapshot_is_baseline() {
        let now = Instant::now();
        let mut presenter = presenter();
        let mut state = snapshot(1, 100, 100);
        state.log = vec!["The duel begins.".into()];

        presenter.apply(&SessionEvent::Combat(state), now);

        assert!(presenter.effects().floating_numbers().is_empty());
        assert_eq!(presenter.phase(), ReconcilePhase::Idle);
        assert_eq!(presenter.message_log().len(), 1);
        assert!(presenter.view_model().actions_enabled);
    }

    #[test]
    fn hp_drop_spawns_exactly_one_damage_number() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        presenter.apply(&SessionEvent::Combat(snapshot(2, 83, 100)), now);

        let view = presenter.view_model();
        let combat = view.combat.unwrap();
        assert_eq!(combat.floating.len(), 1);
        assert_eq!(combat.floating[0].value, -17);
        assert_eq!(combat.floating[0].color, FloatColor::Damage);
        assert!(combat.me.is_shaking);
        assert_eq!(presenter.phase(), ReconcilePhase::EffectScheduled);

        presenter.tick(now + Duration::from_millis(1200));
        assert!(presenter.effects().floating_numbers().is_empty());
        assert_eq!(presenter.phase(), ReconcilePhase::Idle);
    }

    #[test]
    fn crit_wording_flags_critical_number() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);

        let mut next = snapshot(2, 100, 60);
        next.log = vec!["Hero lands a CRITICAL hit!".into()];
        presenter.apply(&SessionEvent::Combat(next), now);

        let combat = presenter.view_model().combat.unwrap();
        assert_eq!(combat.floating[0].color, FloatColor::Critical);
        assert!(combat.opponent.is_flashing);
    }

    #[test]
    fn submission_cycle_walks_phases() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);

        assert_eq!(presenter.request_action(CombatActionKind::Attack, now), Ok(1));
        assert_eq!(presenter.phase(), ReconcilePhase::AwaitingRound);
        assert!(!presenter.view_model().actions_enabled);

        presenter.apply(
            &SessionEvent::ActionAccepted {
                action: CombatActionKind::Attack,
                combat: None,
                message: None,
            },
            now,
        );
        assert_eq!(presenter.gate(), GateState::AwaitingRound { round: 1 });
        assert_eq!(
            presenter.request_action(CombatActionKind::Defend, now),
            Err(GateRejection::AlreadySubmitted)
        );

        presenter.apply(&SessionEvent::Combat(snapshot(2, 90, 80)), now);
        assert_eq!(presenter.phase(), ReconcilePhase::EffectScheduled);
        assert!(presenter.view_model().actions_enabled);
    }

    #[test]
    fn rejection_re_enables_input_and_toasts() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        presenter.request_action(CombatActionKind::Spell, now).unwrap();

        presenter.apply(
            &SessionEvent::ActionRejected {
                action: CombatActionKind::Spell,
                message: "Not enough mana".into(),
            },
            now,
        );

        let view = presenter.view_model();
        assert!(view.actions_enabled);
        assert_eq!(view.toasts[0].text, "Not enough mana");
        assert_eq!(presenter.phase(), ReconcilePhase::Idle);

        presenter.tick(now + Duration::from_millis(4000));
        assert!(presenter.view_model().toasts.is_empty());
    }

    #[test]
    fn polled_finish_shows_outcome_after_delay() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(3, 30, 10)), now);
        presenter.apply(&SessionEvent::Combat(finished("me")), now);

        assert_eq!(presenter.outcome(), None);
        presenter.tick(now + Duration::from_millis(799));
        assert_eq!(presenter.outcome(), None);
        presenter.tick(now + Duration::from_millis(800));
        assert_eq!(presenter.outcome(), Some(CombatOutcome::Victory));
        assert!(!presenter.view_model().actions_enabled);
    }

    #[test]
    fn response_finish_shows_outcome_immediately() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(3, 30, 10)), now);
        presenter.request_action(CombatActionKind::Attack, now).unwrap();

        presenter.apply(
            &SessionEvent::ActionAccepted {
                action: CombatActionKind::Attack,
                combat: Some(finished("foe")),
                message: None,
            },
            now,
        );
        assert_eq!(presenter.outcome(), Some(CombatOutcome::Defeat));
        assert_eq!(presenter.gate(), GateState::Closed);
    }

    #[test]
    fn completion_callback_runs_once_after_four_seconds() {
        let now = Instant::now();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut presenter = presenter();
        let sink = Arc::clone(&seen);
        presenter.on_complete(Box::new(move |outcome| {
            sink.lock().unwrap().push(outcome);
        }));

        presenter.apply(&SessionEvent::Combat(snapshot(3, 30, 10)), now);
        presenter.apply(
            &SessionEvent::ActionAccepted {
                action: CombatActionKind::Attack,
                combat: Some(finished("me")),
                message: None,
            },
            now,
        );

        presenter.tick(now + Duration::from_millis(3999));
        assert!(seen.lock().unwrap().is_empty());

        presenter.tick(now + Duration::from_secs(4));
        presenter.tick(now + Duration::from_secs(9));
        assert_eq!(*seen.lock().unwrap(), vec![CombatOutcome::Victory]);
        assert!(presenter.is_complete());
    }

    #[test]
    fn fight_over_at_mount_still_shows_outcome() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(finished("foe")), now);

        presenter.tick(now + Duration::from_millis(800));
        assert_eq!(presenter.outcome(), Some(CombatOutcome::Defeat));
    }

    #[test]
    fn spectator_sees_player_one_as_me() {
        let now = Instant::now();
        let mut presenter = CombatPresenter::new(&FrontendConfig::default(), None);
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);

        let view = presenter.view_model();
        let combat = view.combat.unwrap();
        assert!(combat.is_spectator);
        assert_eq!(combat.me.id, "me");
        assert!(!view.actions_enabled);
    }

    #[test]
    fn unknown_player_only_watches() {
        let now = Instant::now();
        let mut presenter = CombatPresenter::new(&FrontendConfig::default(), Some("carol".into()));
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);

        let view = presenter.view_model();
        assert!(view.combat.unwrap().is_spectator);
        assert!(!view.actions_enabled);
        assert_eq!(
            presenter.request_action(CombatActionKind::Attack, now),
            Err(GateRejection::Spectating)
        );
        assert_eq!(presenter.gate(), GateState::Ready);
        assert_eq!(presenter.view_model().toasts[0].text, "You are only watching this fight");
    }

    #[test]
    fn late_poll_after_action_response_is_ignored() {
        let now = Instant::now();
        let mut presenter = presenter();
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        presenter.request_action(CombatActionKind::Attack, now).unwrap();

        presenter.apply(
            &SessionEvent::ActionAccepted {
                action: CombatActionKind::Attack,
                combat: Some(snapshot(2, 100, 80)),
                message: None,
            },
            now,
        );
        let impact = presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        assert!(!impact.requires_redraw);
        presenter.apply(&SessionEvent::Combat(snapshot(2, 100, 80)), now);

        let values: Vec<i32> = presenter
            .effects()
            .floating_numbers()
            .iter()
            .map(|number| number.value)
            .collect();
        assert_eq!(values, vec![-20]);
        assert_eq!(presenter.combat().unwrap().round, 2);
        assert_eq!(presenter.request_action(CombatActionKind::Defend, now), Ok(2));
    }

    #[test]
    fn player_two_is_drawn_on_the_left() {
        let now = Instant::now();
        let mut presenter = CombatPresenter::new(&FrontendConfig::default(), Some("foe".into()));
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 100)), now);
        presenter.apply(&SessionEvent::Combat(snapshot(1, 100, 95)), now);

        let combat = presenter.view_model().combat.unwrap();
        assert_eq!(combat.me.id, "foe");
        assert_eq!(combat.me.side, Side::Player2);
        assert_eq!(combat.floating[0].x, 25);
    }

    #[test]
    fn feed_failures_become_toasts() {
        let now = Instant::now();
        let mut presenter = presenter();
        let impact = presenter.apply(
            &SessionEvent::FetchFailed {
                feed: Feed::Energy,
                message: "Could not reach the game server".into(),
            },
            now,
        );
        assert!(impact.requires_redraw);

        let entry = presenter.message_log().recent(1).next().unwrap();
        assert_eq!(entry.level, MessageLevel::Warning);
        assert_eq!(presenter.next_deadline(), Some(now + Duration::from_secs(4)));
    }

    #[test]
    fn header_tracks_secondary_feeds() {
        let now = Instant::now();
        let mut presenter = presenter();
        let energy = EnergyStatus {
            current: 7,
            max: 10,
            next_regen_seconds: Some(30),
        };

        assert!(presenter.apply(&SessionEvent::Energy(energy), now).requires_redraw);
        assert!(!presenter.apply(&SessionEvent::Energy(energy), now).requires_redraw);
        assert_eq!(presenter.view_model().header.energy, Some(energy));
    }
}
