//! Cross-frontend primitives for presenting a combat.
//!
//! Houses the effect dispatcher, the submission gate, the outcome timer,
//! message logging and the view model that both the CLI and future
//! graphical clients reuse. [`CombatPresenter`] ties them together.
pub mod config;
pub mod effects;
pub mod event;
pub mod frontend;
pub mod message;
pub mod outcome;
pub mod services;
pub mod submission;
pub mod view_model;

pub use config::{EffectConfig, EffectTimings, EffectVisibility, FrontendConfig, MessageConfig};
pub use effects::{EffectDispatcher, FloatColor, FloatingNumber};
pub use event::{EventConsumer, EventImpact};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog, Toast, ToastQueue};
pub use outcome::{CombatOutcome, CompletionCallback, OutcomePhase, OutcomeSource, OutcomeTimer};
pub use services::{CombatPresenter, ReconcilePhase};
pub use submission::{GateRejection, GateState, SubmissionGate};
pub use view_model::{CombatView, CombatViewModel, FighterView, HeaderView, PresentationMapper};
