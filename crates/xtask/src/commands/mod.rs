//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod reconcile;
mod tail_logs;

pub use clean::Clean;
pub use reconcile::Reconcile;
pub use tail_logs::TailLogs;
