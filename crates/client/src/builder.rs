//! Client builder with dependency injection pattern.
use std::sync::Arc;

use anyhow::{Context, Result};
use client_api::GameApi;
use client_session::SessionConfig;

use crate::{Client, Frontend};

/// Builder for constructing a [`Client`].
///
/// The API and the frontend are required; the session configuration
/// defaults to [`SessionConfig::default`].
#[derive(Default)]
pub struct ClientBuilder {
    api: Option<Arc<dyn GameApi>>,
    session_config: Option<SessionConfig>,
    frontend: Option<Box<dyn Frontend>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game server API (required).
    pub fn api(mut self, api: Arc<dyn GameApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = Some(config);
        self
    }

    /// Set the frontend (required).
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// # Errors
    ///
    /// Fails when the API or the frontend was not set.
    pub fn build(self) -> Result<Client> {
        let api = self.api.context("API is required. Use .api() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client {
            api,
            session_config: self.session_config.unwrap_or_default(),
            frontend,
        })
    }
}
