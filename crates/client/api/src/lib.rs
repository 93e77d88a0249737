//! REST transport for the arena game server.
//!
//! The server owns every rule (combat resolution, energy, rewards). This
//! crate only describes its endpoints as the [`GameApi`] trait and provides
//! a reqwest-backed implementation.
//!
//! # Usage
//!
//! ```ignore
//! use client_api::{ApiConfig, GameApi, HttpGameApi};
//!
//! let api = HttpGameApi::new(&ApiConfig::from_env())?;
//! let combat = api.fetch_combat("challenge-42").await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use http::HttpGameApi;
pub use traits::GameApi;
pub use types::{
    CombatActionRequest, CombatActionResponse, EnergyStatus, NpcBattleResult, WorldTime,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFailure, MockGameApi};
