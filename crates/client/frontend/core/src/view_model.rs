//! Render-ready snapshot of the combat screen.
//!
//! Fighters are oriented from the local player's point of view: `me` is
//! always drawn on the left and `opponent` on the right. Floating number
//! positions are mirrored accordingly.
use client_api::{EnergyStatus, WorldTime};
use combat_core::{CombatStatus, Element, FighterState, Side, StatusEffect};

use crate::effects::{EffectDispatcher, FloatColor, FloatingNumber};
use crate::message::{MessageLevel, Toast};
use crate::outcome::CombatOutcome;
use crate::services::ReconcilePhase;
use crate::submission::GateState;

/// Complete presentation state consumed by renderers.
#[derive(Clone, Debug, Default)]
pub struct CombatViewModel {
    pub header: HeaderView,
    /// `None` until the first combat snapshot arrives.
    pub combat: Option<CombatView>,
    pub outcome: Option<CombatOutcome>,
    pub actions_enabled: bool,
    pub gate: GateState,
    pub phase: ReconcilePhase,
    pub toasts: Vec<Toast>,
}

impl CombatViewModel {
    /// Check presentation invariants.
    #[cfg(debug_assertions)]
    pub fn validate_invariants(&self) -> Result<(), String> {
        if let Some(combat) = &self.combat {
            for fighter in [&combat.me, &combat.opponent] {
                if fighter.hp < 0 || fighter.hp > fighter.max_hp {
                    return Err(format!(
                        "{} hp {} outside [0, {}]",
                        fighter.id, fighter.hp, fighter.max_hp
                    ));
                }
            }
            if combat.me.side == combat.opponent.side {
                return Err("both fighters on the same side".to_string());
            }
        }
        if self.actions_enabled && self.outcome.is_some() {
            return Err("actions enabled on the outcome screen".to_string());
        }
        Ok(())
    }
}

/// World clock and energy, shown above the fight.
#[derive(Clone, Debug, Default)]
pub struct HeaderView {
    pub world_time: Option<WorldTime>,
    pub energy: Option<EnergyStatus>,
}

#[derive(Clone, Debug)]
pub struct CombatView {
    pub round: u32,
    pub status: CombatStatus,
    pub me: FighterView,
    pub opponent: FighterView,
    /// Local player is not one of the fighters.
    pub is_spectator: bool,
    /// Positions already mirrored so `me` is on the left.
    pub floating: Vec<FloatingNumber>,
    pub last_log_line: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FighterView {
    pub id: String,
    pub name: String,
    pub side: Side,
    pub hp: i32,
    pub max_hp: i32,
    pub hp_percent: u16,
    pub status_effects: Vec<StatusEffect>,
    pub element: Option<Element>,
    /// Server already recorded an action for the open round.
    pub has_acted: bool,
    pub is_shaking: bool,
    pub is_flashing: bool,
    pub is_fainted: bool,
}

impl FighterView {
    pub(crate) fn new(fighter: &FighterState, side: Side, effects: &EffectDispatcher) -> Self {
        Self {
            id: fighter.id.clone(),
            name: fighter.display_name().to_string(),
            side,
            hp: fighter.hp,
            max_hp: fighter.max_hp,
            hp_percent: fighter.hp_percent(),
            status_effects: fighter.status_effects.clone(),
            element: fighter.element.clone(),
            has_acted: fighter.action.is_some(),
            is_shaking: effects.is_shaking(side),
            is_flashing: effects.is_flashing(side),
            is_fainted: effects.is_fainted(side) || fighter.is_fainted(),
        }
    }
}

/// Framework-agnostic styling hooks implemented by each frontend theme.
pub trait PresentationMapper {
    type Style;

    /// Style for an HP readout at `percent` of maximum.
    fn style_health(&self, percent: u16) -> Self::Style;

    fn style_message(&self, level: MessageLevel) -> Self::Style;

    fn style_floating(&self, color: FloatColor) -> Self::Style;

    fn style_outcome(&self, outcome: CombatOutcome) -> Self::Style;

    fn style_element(&self, element: &Element) -> Self::Style;

    fn emphasize_current(&self, base_style: Self::Style) -> Self::Style;
}

/// Mirror dispatcher positions so that `me` ends up on the left.
pub(crate) fn orient(numbers: &[FloatingNumber], me: Side) -> Vec<FloatingNumber> {
    numbers
        .iter()
        .cloned()
        .map(|mut number| {
            if me == Side::Player2 {
                number.x = 100u16.saturating_sub(number.x);
            }
            number
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;
    use combat_core::CombatEvent;
    use std::time::Instant;

    #[test]
    fn mirrors_positions_for_player_two() {
        let mut effects = EffectDispatcher::new(&EffectConfig::default());
        effects.dispatch(
            &CombatEvent::Damaged {
                side: Side::Player2,
                amount: 4,
                hp_before: 10,
                hp_after: 6,
                crit: false,
            },
            Instant::now(),
        );

        let as_p1 = orient(effects.floating_numbers(), Side::Player1);
        let as_p2 = orient(effects.floating_numbers(), Side::Player2);
        assert_eq!(as_p1[0].x, 75);
        assert_eq!(as_p2[0].x, 25);
    }

    #[test]
    fn fighter_view_reflects_effects() {
        let mut effects = EffectDispatcher::new(&EffectConfig::default());
        effects.dispatch(&CombatEvent::Fainted { side: Side::Player1 }, Instant::now());

        let fighter = FighterState::new("a", 0, 50).with_name("Aria");
        let view = FighterView::new(&fighter, Side::Player1, &effects);
        assert_eq!(view.name, "Aria");
        assert!(view.is_fainted);
        assert_eq!(view.hp_percent, 0);
    }
}
