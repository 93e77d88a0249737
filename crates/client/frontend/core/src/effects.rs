//! Transient visual effects scheduled from combat events.
//!
//! Every effect has a fixed lifetime. Scheduling takes an explicit `now` so
//! the dispatcher stays deterministic; the UI loop calls [`EffectDispatcher::expire`]
//! and sleeps until [`EffectDispatcher::next_deadline`].
use std::time::Instant;

use arrayvec::ArrayVec;
use combat_core::{CombatEvent, Side};

use crate::config::{EffectConfig, EffectTimings, EffectVisibility};

/// Horizontal offsets (percent) cycled per side: centre, right, left.
const SPREAD_PATTERN: [i16; 3] = [0, 8, -8];
const NORMAL_Y: u16 = 40;
const CRIT_Y: u16 = 25;
/// Numbers on screen at once; the oldest is dropped beyond this.
pub const MAX_FLOATING: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatColor {
    Damage,
    Critical,
    Heal,
}

/// A number floating above a fighter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatingNumber {
    pub id: u64,
    pub side: Side,
    /// Negative for damage, positive for heals.
    pub value: i32,
    /// Horizontal position, percent of the combat area.
    pub x: u16,
    /// Vertical position, percent of the combat area.
    pub y: u16,
    pub color: FloatColor,
    pub is_crit: bool,
    pub expires_at: Instant,
}

impl FloatingNumber {
    pub fn label(&self) -> String {
        if self.value > 0 {
            format!("+{}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SideEffects {
    shake_until: Option<Instant>,
    flash_until: Option<Instant>,
    fainted: bool,
    spawned: usize,
}

/// Schedules floating numbers, shakes, crit flashes and faint markers.
#[derive(Clone, Debug)]
pub struct EffectDispatcher {
    timings: EffectTimings,
    visibility: EffectVisibility,
    next_id: u64,
    floating: ArrayVec<FloatingNumber, MAX_FLOATING>,
    sides: [SideEffects; 2],
}

impl EffectDispatcher {
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            timings: config.timings,
            visibility: config.visibility.clone(),
            next_id: 0,
            floating: ArrayVec::new(),
            sides: Default::default(),
        }
    }

    pub fn timings(&self) -> &EffectTimings {
        &self.timings
    }

    /// Schedule the effects of one event. Returns `true` when anything visible
    /// changed.
    pub fn dispatch(&mut self, event: &CombatEvent, now: Instant) -> bool {
        match event {
            CombatEvent::Damaged {
                side, amount, crit, ..
            } => {
                let value = -(i64::from(*amount).min(i64::from(i32::MAX)) as i32);
                let color = if *crit {
                    FloatColor::Critical
                } else {
                    FloatColor::Damage
                };
                self.spawn_number(*side, value, color, *crit, now);

                if self.visibility.show_screen_shake {
                    let effects = &mut self.sides[index(*side)];
                    effects.shake_until = Some(now + self.timings.shake);
                    if *crit {
                        effects.flash_until = Some(now + self.timings.crit_flash);
                    }
                }
                true
            }
            CombatEvent::Healed { side, amount, .. } => {
                let value = i64::from(*amount).min(i64::from(i32::MAX)) as i32;
                self.spawn_number(*side, value, FloatColor::Heal, false, now);
                self.sides[index(*side)].fainted = false;
                true
            }
            CombatEvent::Fainted { side } => {
                self.sides[index(*side)].fainted = true;
                true
            }
            CombatEvent::RoundAdvanced { .. } | CombatEvent::Finished { .. } => false,
        }
    }

    fn spawn_number(&mut self, side: Side, value: i32, color: FloatColor, is_crit: bool, now: Instant) {
        if !self.visibility.show_floating_numbers {
            return;
        }

        let effects = &mut self.sides[index(side)];
        let offset = SPREAD_PATTERN[effects.spawned % SPREAD_PATTERN.len()];
        effects.spawned += 1;

        let x = (column(side) as i16 + offset).clamp(0, 100) as u16;
        let y = if is_crit { CRIT_Y } else { NORMAL_Y };

        if self.floating.is_full() {
            self.floating.remove(0);
        }

        self.next_id += 1;
        self.floating.push(FloatingNumber {
            id: self.next_id,
            side,
            value,
            x,
            y,
            color,
            is_crit,
            expires_at: now + self.timings.floating_number,
        });
    }

    /// Drop effects whose lifetime has elapsed. Returns `true` when anything
    /// visible changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.floating.len();
        self.floating.retain(|number| number.expires_at > now);
        let mut changed = self.floating.len() != before;

        for effects in &mut self.sides {
            changed |= clear_elapsed(&mut effects.shake_until, now);
            changed |= clear_elapsed(&mut effects.flash_until, now);
        }
        changed
    }

    /// Earliest instant at which an effect ends.
    pub fn next_deadline(&self) -> Option<Instant> {
        let timers = self
            .sides
            .iter()
            .flat_map(|effects| [effects.shake_until, effects.flash_until])
            .flatten();

        self.floating
            .iter()
            .map(|number| number.expires_at)
            .chain(timers)
            .min()
    }

    /// Cancel every pending effect.
    pub fn clear(&mut self) {
        self.floating.clear();
        self.sides = Default::default();
    }

    pub fn floating_numbers(&self) -> &[FloatingNumber] {
        &self.floating
    }

    pub fn is_shaking(&self, side: Side) -> bool {
        self.sides[index(side)].shake_until.is_some()
    }

    pub fn is_flashing(&self, side: Side) -> bool {
        self.sides[index(side)].flash_until.is_some()
    }

    pub fn is_fainted(&self, side: Side) -> bool {
        self.sides[index(side)].fainted
    }

    pub fn is_idle(&self) -> bool {
        self.next_deadline().is_none()
    }
}

fn index(side: Side) -> usize {
    match side {
        Side::Player1 => 0,
        Side::Player2 => 1,
    }
}

/// Column centre of each fighter, percent of the combat area.
fn column(side: Side) -> u16 {
    match side {
        Side::Player1 => 25,
        Side::Player2 => 75,
    }
}

fn clear_elapsed(deadline: &mut Option<Instant>, now: Instant) -> bool {
    if deadline.is_some_and(|at| at <= now) {
        *deadline = None;
        true
    } else {
        false
    }
}
