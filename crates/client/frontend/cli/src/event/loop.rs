use std::time::Instant as StdInstant;

use anyhow::Result;
use client_frontend_core::{CombatOutcome, CombatPresenter, CompletionCallback};
use client_session::{Feed, SessionEvent, SessionHandle};
use tokio::{
    sync::{broadcast, oneshot},
    time::{self, Duration, Instant},
};

use crate::{config::CliConfig, input::InputHandler, presentation::terminal::Tui, state::AppState};

pub(crate) const FRAME_INTERVAL_MS: u64 = 16;

/// Owns the presenter for the lifetime of the combat screen.
pub struct EventLoop {
    pub(crate) handle: SessionHandle,
    pub(crate) events: broadcast::Receiver<SessionEvent>,
    pub(crate) presenter: CombatPresenter,
    pub(crate) input: InputHandler,
    pub(crate) app_state: AppState,
    pub(crate) cli_config: CliConfig,
    completed: oneshot::Receiver<CombatOutcome>,
}

impl EventLoop {
    /// Wrap `presenter`. The loop ends once the outcome screen has been shown.
    /// `on_complete` is chained after any callback already registered on the
    /// presenter, followed by the signal that stops the loop.
    pub fn new(
        handle: SessionHandle,
        mut presenter: CombatPresenter,
        cli_config: CliConfig,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        let (tx, completed) = oneshot::channel();
        presenter.on_complete(Box::new(move |outcome| {
            if let Some(callback) = on_complete {
                callback(outcome);
            }
            let _ = tx.send(outcome);
        }));

        let events = handle.subscribe();
        // Snapshots published before the subscription are gone; ask again.
        for feed in [Feed::Combat, Feed::WorldTime, Feed::Energy] {
            handle.refresh(feed);
        }

        Self {
            events,
            handle,
            presenter,
            input: InputHandler::new(),
            app_state: AppState::new(),
            cli_config,
            completed,
        }
    }

    /// Run until the user quits, the session closes, or the outcome screen
    /// completes. Returns the presenter with its message log.
    pub async fn run(mut self, terminal: &mut Tui) -> Result<CombatPresenter> {
        self.render(terminal)?;

        loop {
            let wake_at = self
                .presenter
                .next_deadline()
                .map(Instant::from_std)
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                result = self.events.recv() => {
                    if self.handle_session_event(result, terminal)? {
                        break;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal)? {
                        break;
                    }
                }
                _ = time::sleep_until(wake_at) => {
                    self.handle_timer_tick(StdInstant::now(), terminal)?;
                }
                outcome = &mut self.completed => {
                    if let Ok(outcome) = outcome {
                        tracing::info!(%outcome, "combat screen complete");
                    }
                    break;
                }
            }
        }

        self.presenter.clear();
        Ok(self.presenter)
    }
}
