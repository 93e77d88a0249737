//! Combat snapshot model and delta reconciliation shared across clients.
//!
//! `combat-core` defines the shape of the server's combat payload and the
//! pure logic that turns two successive snapshots into visual events. It has
//! no I/O and no clock; frontends decide when and how to animate.
pub mod action;
pub mod reconcile;
pub mod state;

pub use action::{CombatActionKind, Side};
pub use reconcile::{CRIT_MARKER, CombatEvent, Reconciler, Reconciliation, extract_events};
pub use state::{CombatState, CombatStatus, Element, FighterState, LastAction, StatusEffect};
