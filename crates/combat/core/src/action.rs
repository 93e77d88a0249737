//! Combat action vocabulary and side identifiers.

/// Action a fighter may choose for the current round.
///
/// Resolution happens on the server; the client only names the choice.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CombatActionKind {
    Attack,
    Defend,
    Dodge,
    Spell,
}

impl CombatActionKind {
    pub const ALL: [CombatActionKind; 4] = [
        CombatActionKind::Attack,
        CombatActionKind::Defend,
        CombatActionKind::Dodge,
        CombatActionKind::Spell,
    ];

    /// Human-facing label used by frontends.
    pub fn label(self) -> &'static str {
        match self {
            CombatActionKind::Attack => "Attack",
            CombatActionKind::Defend => "Defend",
            CombatActionKind::Dodge => "Dodge",
            CombatActionKind::Spell => "Spell",
        }
    }
}

/// One of the two sub-records of a combat snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player1, Side::Player2];

    pub fn opposite(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}
