//! Event inference from successive combat snapshots.
//!
//! The server does not describe what happened during a round; it only sends
//! the resulting state. This module compares two snapshots and derives the
//! semantic events a frontend animates. The inference is a heuristic:
//!
//! - several hits on the same fighter within one poll collapse into a single
//!   delta;
//! - crits are detected from the wording of the last log line.

use crate::action::Side;
use crate::state::{CombatState, CombatStatus};

/// Marker searched (case-insensitively) in the last log line to flag crits.
pub const CRIT_MARKER: &str = "crit";

/// Semantic event derived from two snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    RoundAdvanced {
        from: u32,
        to: u32,
    },
    Damaged {
        side: Side,
        amount: u32,
        hp_before: i32,
        hp_after: i32,
        crit: bool,
    },
    Healed {
        side: Side,
        amount: u32,
        hp_before: i32,
        hp_after: i32,
    },
    Fainted {
        side: Side,
    },
    Finished {
        winner_id: Option<String>,
    },
}

impl CombatEvent {
    /// Side the event is about, when it concerns a single fighter.
    pub fn side(&self) -> Option<Side> {
        match self {
            CombatEvent::Damaged { side, .. }
            | CombatEvent::Healed { side, .. }
            | CombatEvent::Fainted { side } => Some(*side),
            CombatEvent::RoundAdvanced { .. } | CombatEvent::Finished { .. } => None,
        }
    }
}

/// Extract events between two normalized snapshots.
///
/// # Event Ordering
///
/// 1. `RoundAdvanced`
/// 2. Per side (`Player1`, then `Player2`): `Damaged` or `Healed`, then `Fainted`
/// 3. `Finished`
pub fn extract_events(previous: &CombatState, current: &CombatState) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    if current.round > previous.round {
        events.push(CombatEvent::RoundAdvanced {
            from: previous.round,
            to: current.round,
        });
    }

    let crit = last_line_mentions_crit(current);

    for side in Side::BOTH {
        let before = previous.fighter(side).hp;
        let after = current.fighter(side).hp;

        if after < before {
            events.push(CombatEvent::Damaged {
                side,
                amount: before.abs_diff(after),
                hp_before: before,
                hp_after: after,
                crit,
            });
        } else if after > before {
            events.push(CombatEvent::Healed {
                side,
                amount: after.abs_diff(before),
                hp_before: before,
                hp_after: after,
            });
        }

        if before > 0 && after == 0 {
            events.push(CombatEvent::Fainted { side });
        }
    }

    if previous.status != CombatStatus::Finished && current.status == CombatStatus::Finished {
        events.push(CombatEvent::Finished {
            winner_id: current.winner_id.clone(),
        });
    }

    events
}

fn last_line_mentions_crit(state: &CombatState) -> bool {
    state
        .last_log_line()
        .is_some_and(|line| line.to_ascii_lowercase().contains(CRIT_MARKER))
}

/// Result of observing one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub events: Vec<CombatEvent>,
    /// Log lines appended since the previous snapshot.
    pub new_log_lines: Vec<String>,
    /// The first snapshot seen was already finished.
    pub already_finished: bool,
    /// Snapshot was older than the baseline and was ignored.
    pub stale: bool,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.new_log_lines.is_empty() && !self.already_finished
    }

    pub fn finished(&self) -> Option<&CombatEvent> {
        self.events
            .iter()
            .find(|event| matches!(event, CombatEvent::Finished { .. }))
    }
}

/// Remembers the last snapshot and diffs each new one against it.
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    previous: Option<CombatState>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<&CombatState> {
        self.previous.as_ref()
    }

    /// Forget the baseline; the next snapshot is treated as the first one.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Diff `snapshot` against the stored baseline and keep it as the new one.
    ///
    /// The first snapshot only establishes the baseline and yields no events.
    /// A snapshot behind the baseline (lower round, or not finished after a
    /// finished one) is dropped and the baseline kept.
    pub fn observe(&mut self, snapshot: CombatState) -> Reconciliation {
        let current = snapshot.normalized();

        let reconciliation = match self.previous.as_ref() {
            None => Reconciliation {
                events: Vec::new(),
                new_log_lines: current.log.clone(),
                already_finished: current.is_finished(),
                stale: false,
            },
            Some(previous) if is_behind(previous, &current) => {
                tracing::debug!(
                    target: "combat::reconcile",
                    baseline = previous.round,
                    round = current.round,
                    "stale snapshot ignored"
                );
                return Reconciliation {
                    stale: true,
                    ..Reconciliation::default()
                };
            }
            Some(previous) => Reconciliation {
                events: extract_events(previous, &current),
                new_log_lines: appended_lines(&previous.log, &current.log),
                already_finished: false,
                stale: false,
            },
        };

        if !reconciliation.events.is_empty() {
            tracing::debug!(
                target: "combat::reconcile",
                round = current.round,
                events = reconciliation.events.len(),
                "snapshot produced events"
            );
        }

        self.previous = Some(current);
        reconciliation
    }
}

fn is_behind(baseline: &CombatState, snapshot: &CombatState) -> bool {
    snapshot.round < baseline.round || (baseline.is_finished() && !snapshot.is_finished())
}

/// Lines of `current` past its longest prefix that ends `previous`.
///
/// Covers a growing log, a fixed-size window that slides forward, and a
/// replaced log (no overlap, everything is new).
fn appended_lines(previous: &[String], current: &[String]) -> Vec<String> {
    let longest = previous.len().min(current.len());
    let overlap = (0..=longest)
        .rev()
        .find(|&k| previous[previous.len() - k..] == current[..k])
        .unwrap_or(0);
    current[overlap..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FighterState;

    fn snapshot(round: u32, hp1: i32, hp2: i32) -> CombatState {
        CombatState::new(
            round,
            FighterState::new("p1", hp1, 100),
            FighterState::new("p2", hp2, 100),
        )
    }

    #[test]
    fn damage_yields_single_event_with_amount() {
        let prev = snapshot(1, 100, 100);
        let curr = snapshot(1, 100, 73);

        let events = extract_events(&prev, &curr);
        assert_eq!(
            events,
            vec![CombatEvent::Damaged {
                side: Side::Player2,
                amount: 27,
                hp_before: 100,
                hp_after: 73,
                crit: false,
            }]
        );
    }

    #[test]
    fn crit_detected_from_last_log_line() {
        let prev = snapshot(1, 100, 100);
        let mut curr = snapshot(2, 60, 100);
        curr.log = vec!["p2 attacks".into(), "A CRITICAL blow!".into()];

        let events = extract_events(&prev, &curr);
        assert!(events.contains(&CombatEvent::Damaged {
            side: Side::Player1,
            amount: 40,
            hp_before: 100,
            hp_after: 60,
            crit: true,
        }));
    }

    #[test]
    fn crit_only_checks_the_last_line() {
        let prev = snapshot(1, 100, 100);
        let mut curr = snapshot(1, 90, 100);
        curr.log = vec!["critical strike".into(), "p1 defends".into()];

        let events = extract_events(&prev, &curr);
        assert!(matches!(
            events[0],
            CombatEvent::Damaged { crit: false, .. }
        ));
    }

    #[test]
    fn heal_and_round_advance() {
        let prev = snapshot(4, 40, 50);
        let curr = snapshot(5, 55, 50);

        let events = extract_events(&prev, &curr);
        assert_eq!(
            events,
            vec![
                CombatEvent::RoundAdvanced { from: 4, to: 5 },
                CombatEvent::Healed {
                    side: Side::Player1,
                    amount: 15,
                    hp_before: 40,
                    hp_after: 55,
                },
            ]
        );
    }

    #[test]
    fn faint_follows_damage_and_finish_is_last() {
        let prev = snapshot(6, 100, 12);
        let mut curr = snapshot(6, 100, 0);
        curr.status = CombatStatus::Finished;
        curr.winner_id = Some("p1".into());

        let events = extract_events(&prev, &curr);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], CombatEvent::Damaged { side: Side::Player2, amount: 12, .. }));
        assert_eq!(events[1], CombatEvent::Fainted { side: Side::Player2 });
        assert_eq!(
            events[2],
            CombatEvent::Finished {
                winner_id: Some("p1".into())
            }
        );
    }

    #[test]
    fn finished_is_reported_once() {
        let mut prev = snapshot(6, 100, 0);
        prev.status = CombatStatus::Finished;
        let curr = prev.clone();

        assert!(extract_events(&prev, &curr).is_empty());
    }

    #[test]
    fn reconciler_first_snapshot_is_baseline() {
        let mut reconciler = Reconciler::new();
        let mut first = snapshot(1, 100, 100);
        first.log = vec!["The duel begins".into()];

        let result = reconciler.observe(first);
        assert!(result.events.is_empty());
        assert_eq!(result.new_log_lines, vec!["The duel begins".to_string()]);
        assert!(!result.already_finished);
    }

    #[test]
    fn reconciler_reports_fight_already_over() {
        let mut reconciler = Reconciler::new();
        let mut first = snapshot(9, 0, 30);
        first.status = CombatStatus::Finished;

        let result = reconciler.observe(first);
        assert!(result.already_finished);
        assert!(result.finished().is_none());
    }

    #[test]
    fn reconciler_diffs_against_normalized_baseline() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(snapshot(1, 100, 100));

        // Overkill damage is clamped, so the delta stops at zero.
        let result = reconciler.observe(snapshot(1, 100, -30));
        assert_eq!(
            result.events,
            vec![
                CombatEvent::Damaged {
                    side: Side::Player2,
                    amount: 100,
                    hp_before: 100,
                    hp_after: 0,
                    crit: false,
                },
                CombatEvent::Fainted { side: Side::Player2 },
            ]
        );
        assert_eq!(reconciler.previous().unwrap().player2.hp, 0);
    }

    #[test]
    fn reconciler_returns_only_new_log_lines() {
        let mut reconciler = Reconciler::new();
        let mut first = snapshot(1, 100, 100);
        first.log = vec!["a".into()];
        reconciler.observe(first.clone());

        let mut second = first.clone();
        second.log.push("b".into());
        second.log.push("c".into());
        let result = reconciler.observe(second.clone());
        assert_eq!(result.new_log_lines, vec!["b".to_string(), "c".to_string()]);

        let result = reconciler.observe(second);
        assert!(result.is_empty());
    }

    #[test]
    fn truncated_log_is_replayed() {
        assert_eq!(
            appended_lines(&["a".into(), "b".into()], &["z".into()]),
            vec!["z".to_string()]
        );
    }

    #[test]
    fn sliding_log_window_yields_only_the_new_tail() {
        let window = |lines: &[&str]| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        assert_eq!(
            appended_lines(&window(&["a", "b", "c"]), &window(&["b", "c", "d"])),
            vec!["d".to_string()]
        );
        assert_eq!(
            appended_lines(&window(&["a", "b", "c"]), &window(&["c", "d", "e"])),
            vec!["d".to_string(), "e".to_string()]
        );
        assert!(appended_lines(&window(&["a", "b"]), &window(&["a", "b"])).is_empty());
    }

    #[test]
    fn older_round_keeps_baseline() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(snapshot(1, 100, 100));
        reconciler.observe(snapshot(2, 100, 80));

        let result = reconciler.observe(snapshot(1, 100, 100));
        assert!(result.stale);
        assert!(result.is_empty());
        assert_eq!(reconciler.previous().unwrap().round, 2);

        // The same state again is not a second hit.
        let result = reconciler.observe(snapshot(2, 100, 80));
        assert!(!result.stale);
        assert!(result.events.is_empty());
    }

    #[test]
    fn unfinished_snapshot_after_finish_is_ignored() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(snapshot(6, 100, 12));
        let mut over = snapshot(6, 100, 0);
        over.status = CombatStatus::Finished;
        reconciler.observe(over);

        let result = reconciler.observe(snapshot(6, 100, 12));
        assert!(result.stale);
        assert!(reconciler.previous().unwrap().is_finished());
    }

    #[test]
    fn reset_drops_baseline() {
        let mut reconciler = Reconciler::new();
        reconciler.observe(snapshot(1, 100, 100));
        reconciler.reset();

        let result = reconciler.observe(snapshot(2, 10, 10));
        assert!(result.events.is_empty());
    }
}
