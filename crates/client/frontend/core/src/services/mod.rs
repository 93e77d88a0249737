//! Stateful services sitting between session events and renderers.
pub mod presenter;

pub use presenter::{CombatPresenter, ReconcilePhase};
