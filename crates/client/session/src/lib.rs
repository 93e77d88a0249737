//! Client session: polling feeds, the session event bus and action submission.
//!
//! A [`Session`] owns one poll task per feed (combat, world time, energy).
//! Every fetch result is published on a broadcast bus; frontends reach the
//! session through a cloneable [`SessionHandle`]. [`AutoBattle`] runs the
//! headless NPC fight loop.
pub mod auto_battle;
pub mod config;
pub mod error;
pub mod events;
pub mod handle;
pub mod poller;
pub mod session;

pub use auto_battle::{AutoBattle, AutoBattleProgress, AutoBattleSummary, StopReason};
pub use config::{AutoBattleConfig, PollIntervals, SessionConfig};
pub use error::{Result, SessionError};
pub use events::{Feed, SessionBus, SessionEvent};
pub use handle::SessionHandle;
pub use poller::{CombatSource, EnergySource, PollSource, PollWorker, WorldTimeSource};
pub use session::Session;
