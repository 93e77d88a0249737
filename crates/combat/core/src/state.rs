//! Combat snapshot model as delivered by the game server.
//!
//! A [`CombatState`] arrives wholesale on every poll. The client never edits
//! its game meaning; [`CombatState::normalized`] only clamps values that the
//! presentation layer relies on (`0 <= hp <= max_hp`).
use std::fmt;

use crate::action::{CombatActionKind, Side};

/// Lifecycle of a server-side combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum CombatStatus {
    /// Round open, waiting for fighters to choose actions.
    #[default]
    Waiting,
    /// Round resolved by the server, next round not yet opened.
    Resolved,
    /// Combat over.
    Finished,
}

/// Elemental affinity shown next to a fighter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Light,
    Dark,
    /// Element name the client does not know about.
    Other(String),
}

impl Element {
    pub fn as_str(&self) -> &str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Light => "light",
            Element::Dark => "dark",
            Element::Other(name) => name,
        }
    }
}

impl From<String> for Element {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "fire" => Element::Fire,
            "water" => Element::Water,
            "earth" => Element::Earth,
            "air" | "wind" => Element::Air,
            "light" => Element::Light,
            "dark" | "shadow" => Element::Dark,
            _ => Element::Other(raw),
        }
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.as_str().to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status effect currently applied to a fighter (display only).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatusEffect {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turns_left: u32,
}

impl StatusEffect {
    pub fn new(kind: impl Into<String>, turns_left: u32) -> Self {
        Self {
            kind: kind.into(),
            turns_left,
        }
    }
}

/// One fighter's sub-record inside a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FighterState {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    /// Action chosen for the open round, if the server already recorded one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: Option<CombatActionKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: Vec<StatusEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
}

impl FighterState {
    pub fn new(id: impl Into<String>, hp: i32, max_hp: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            hp,
            max_hp,
            action: None,
            status_effects: Vec::new(),
            element: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name to show, falling back to the id when the server sent none.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    /// Remaining health as a whole percentage in `0..=100`.
    pub fn hp_percent(&self) -> u16 {
        if self.max_hp <= 0 {
            return 0;
        }
        let hp = self.hp.clamp(0, self.max_hp) as i64;
        ((hp * 100) / self.max_hp as i64) as u16
    }

    fn normalize(&mut self) {
        self.max_hp = self.max_hp.max(0);
        self.hp = self.hp.clamp(0, self.max_hp);
    }
}

/// Informational descriptor of the most recent resolved action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LastAction {
    pub actor_id: Option<String>,
    pub action: Option<String>,
    pub damage: Option<i32>,
    pub is_crit: Option<bool>,
}

/// Complete combat snapshot for one challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombatState {
    pub round: u32,
    pub player1: FighterState,
    pub player2: FighterState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub log: Vec<String>,
    pub status: CombatStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub winner_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_action: Option<LastAction>,
}

impl CombatState {
    pub fn new(round: u32, player1: FighterState, player2: FighterState) -> Self {
        Self {
            round,
            player1,
            player2,
            log: Vec::new(),
            status: CombatStatus::Waiting,
            winner_id: None,
            last_action: None,
        }
    }

    pub fn fighter(&self, side: Side) -> &FighterState {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut FighterState {
        match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        }
    }

    /// Side controlled by `player_id`, if that player takes part in the fight.
    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if self.player1.id == player_id {
            Some(Side::Player1)
        } else if self.player2.id == player_id {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == CombatStatus::Finished
    }

    /// True when `player_id` is the declared winner of a finished fight.
    pub fn is_winner(&self, player_id: &str) -> bool {
        self.winner_id.as_deref() == Some(player_id)
    }

    pub fn last_log_line(&self) -> Option<&str> {
        self.log.last().map(String::as_str)
    }

    /// Returns a copy with every fighter's HP clamped into `[0, max_hp]`.
    pub fn normalized(mut self) -> Self {
        self.player1.normalize();
        self.player2.normalize();
        self
    }
}
