//! Arena client binary.
//!
//! Composition root assembling the HTTP game API, the session pollers and
//! the terminal frontend. With `AUTO_BATTLE_NPC_ID` set it instead runs the
//! headless NPC auto-battle loop.
//!
//! ```bash
//! ARENA_CHALLENGE_ID=abc ARENA_PLAYER_ID=me cargo run -p arena-client
//! AUTO_BATTLE_NPC_ID=goblin AUTO_BATTLE_COUNT=5 cargo run -p arena-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use arena_client::{Client, headless};
    use client_api::{ApiConfig, GameApi, HttpGameApi};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use client_session::{AutoBattleConfig, SessionConfig};

    // 1. Load configuration from environment
    let api_config = ApiConfig::from_env();
    let session_config = SessionConfig::from_env();
    let auto_battle_config = AutoBattleConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    let session_id = std::env::var("ARENA_SESSION_ID").ok();
    let log_path = logging::setup_logging(session_id.as_deref())?;

    tracing::info!("Starting arena client");
    tracing::info!("Server: {}", api_config.base_url);
    tracing::info!("Log file: {}", log_path.display());

    // 3. Build the API
    let api: Arc<dyn GameApi> =
        Arc::new(HttpGameApi::new(&api_config).context("failed to build HTTP client")?);

    // 4. Headless auto-battle
    if auto_battle_config.npc_id.is_some() {
        headless::run_auto_battle(api, auto_battle_config).await?;
        return Ok(());
    }

    // 5. Combat screen
    let frontend = CliFrontend::new(frontend_config, cli_config).on_complete(Box::new(
        |outcome| tracing::info!(%outcome, "combat finished"),
    ));

    let client = Client::builder()
        .api(api)
        .session_config(session_config)
        .frontend(frontend)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
