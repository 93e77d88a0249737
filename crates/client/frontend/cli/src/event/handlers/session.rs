//! Session events and presenter timers.
use std::time::Instant;

use anyhow::Result;
use client_frontend_core::EventConsumer;
use client_session::SessionEvent;
use tokio::sync::broadcast::error::RecvError;

use super::super::EventLoop;
use crate::presentation::terminal::Tui;

impl EventLoop {
    /// Feed one bus message to the presenter. Returns `true` when the loop
    /// should stop.
    pub(in crate::event) fn handle_session_event(
        &mut self,
        result: Result<SessionEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(event) => {
                let impact = self.presenter.on_event(&event);
                if impact.requires_redraw {
                    self.render(terminal)?;
                }
                Ok(false)
            }
            Err(RecvError::Closed) => {
                tracing::warn!("session event stream closed");
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("dropped {} stale session events", skipped);
                Ok(false)
            }
        }
    }

    /// Expire effects, toasts and the outcome timer.
    pub(in crate::event) fn handle_timer_tick(
        &mut self,
        now: Instant,
        terminal: &mut Tui,
    ) -> Result<()> {
        if self.presenter.tick(now).requires_redraw {
            self.render(terminal)?;
        }
        Ok(())
    }
}
