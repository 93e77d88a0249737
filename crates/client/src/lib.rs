//! Top-level client: wires the game server API, the session pollers and a
//! frontend together.
//!
//! ```text
//! Client
//!   ├─→ GameApi (HTTP or mock)
//!   ├─→ Session (poll workers + event bus, owned here)
//!   └─→ Frontend (receives a SessionHandle only)
//! ```

mod builder;
pub mod headless;

pub use builder::ClientBuilder;
pub use client_frontend_core::Frontend;

use std::sync::Arc;

use anyhow::Result;
use client_api::GameApi;
use client_session::{Session, SessionConfig};

/// Composition root of one client run.
///
/// # Lifecycle
///
/// 1. `Client::builder()` collects the API, session config and frontend
/// 2. `Client::run()` starts the session pollers
/// 3. Control passes to the frontend until it returns
/// 4. The pollers are shut down
pub struct Client {
    api: Arc<dyn GameApi>,
    session_config: SessionConfig,
    frontend: Box<dyn Frontend>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub async fn run(self) -> Result<()> {
        let session = Session::start(self.api, self.session_config);
        tracing::info!(feeds = ?session.feeds(), "session started");

        let mut frontend = self.frontend;
        let frontend_result = frontend.run(session.handle()).await;

        session.shutdown().await;
        frontend_result
    }
}
