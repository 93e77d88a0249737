//! Keyboard input.
use std::time::Instant;

use anyhow::Result;
use client_frontend_core::EventConsumer;
use combat_core::CombatActionKind;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind};
use tokio::time::Duration;

use super::super::EventLoop;
use crate::{input::KeyAction, presentation::terminal::Tui};

impl EventLoop {
    /// Poll for a key without blocking. Returns `true` when the user quit.
    pub(in crate::event) fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal)
            }
            TermEvent::Resize(_, _) => {
                self.render(terminal)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent, terminal: &mut Tui) -> Result<bool> {
        match self.input.handle_key(key, self.app_state.mode) {
            KeyAction::Quit => {
                self.presenter.message_log_mut().push_text("Leaving the arena...");
                self.render(terminal)?;
                Ok(true)
            }
            KeyAction::Submit(action) => {
                self.submit(action);
                self.render(terminal)?;
                Ok(false)
            }
            KeyAction::ToggleHelp => {
                self.app_state.toggle_help();
                self.render(terminal)?;
                Ok(false)
            }
            KeyAction::ExitOverlay => {
                self.app_state.exit_to_combat();
                self.render(terminal)?;
                Ok(false)
            }
            KeyAction::None => Ok(false),
        }
    }

    /// Reserve the round locally, then hand the request to the session.
    /// The result comes back on the bus as `ActionAccepted`/`ActionRejected`.
    fn submit(&mut self, action: CombatActionKind) {
        if self.presenter.outcome().is_some() {
            return;
        }
        match self.presenter.request_action(action, Instant::now()) {
            Ok(round) => {
                tracing::info!(round, %action, "submitting action");
                drop(self.handle.dispatch_action(action));
            }
            Err(rejection) => {
                tracing::debug!(%action, %rejection, "submission refused locally");
            }
        }
    }
}
