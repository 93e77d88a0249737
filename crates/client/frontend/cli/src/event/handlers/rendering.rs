//! Rendering.
use anyhow::Result;
use client_frontend_core::EventConsumer;

use super::super::EventLoop;
use crate::presentation::{terminal::Tui, ui};

impl EventLoop {
    pub(in crate::event) fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let view_model = self.presenter.view_model();

        #[cfg(debug_assertions)]
        if let Err(violation) = view_model.validate_invariants() {
            tracing::error!("view model invariant violated: {violation}");
        }

        let ctx = ui::RenderContext {
            view_model: &view_model,
            messages: self.presenter.message_log(),
            app_state: &self.app_state,
            message_panel_height: self.cli_config.ui.message_panel_height,
        };

        ui::render_with_view_model(terminal, &ctx)
    }
}
