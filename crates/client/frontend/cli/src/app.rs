//! [`CliFrontend`]: the terminal implementation of [`Frontend`].
use anyhow::Result;
use async_trait::async_trait;
use client_frontend_core::{CombatPresenter, CompletionCallback, EventConsumer, Frontend, FrontendConfig};
use client_session::SessionHandle;

use crate::{config::CliConfig, event::EventLoop, presentation::terminal};

/// Terminal combat screen.
///
/// A pure UI layer: it receives a [`SessionHandle`], never owns the session,
/// and returns once the outcome screen has completed or the user quits.
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
    on_complete: Option<CompletionCallback>,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
            on_complete: None,
        }
    }

    /// Callback invoked once the victory/defeat screen has been shown.
    pub fn on_complete(mut self, callback: CompletionCallback) -> Self {
        self.on_complete = Some(callback);
        self
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: SessionHandle) -> Result<()> {
        tracing::info!(
            challenge = handle.challenge_id().unwrap_or("-"),
            player = handle.player_id().unwrap_or("-"),
            "CLI frontend starting"
        );

        let mut presenter = CombatPresenter::new(
            &self.frontend_config,
            handle.player_id().map(str::to_string),
        );
        let greeting = match handle.challenge_id() {
            Some(id) => format!("Entering challenge {id}."),
            None => "No challenge selected; showing world status only.".to_string(),
        };
        presenter.message_log_mut().push_text(greeting);

        let event_loop = EventLoop::new(
            handle,
            presenter,
            self.cli_config.clone(),
            self.on_complete.take(),
        );

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let presenter = event_loop.run(&mut terminal).await?;

        terminal::restore()?;
        tracing::info!(
            messages = presenter.message_log().len(),
            "CLI frontend exiting"
        );
        Ok(())
    }
}
