//! Terminal frontend for the arena combat screen.
//!
//! [`CliFrontend`] implements [`client_frontend_core::Frontend`]. It
//! subscribes to the session bus through a `SessionHandle`, feeds a
//! `CombatPresenter` and draws its view model with ratatui.

mod app;
mod config;
mod event;
mod input;
pub mod logging;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::{CliConfig, UiConfig};

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
