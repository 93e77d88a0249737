//! Action bar with the four combat choices and the submission state.
use client_frontend_core::{CombatViewModel, GateState};
use combat_core::CombatActionKind;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::InputHandler;
use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, view_model: &CombatViewModel, theme: &RatatuiTheme) {
    let enabled = view_model.actions_enabled;
    let key_style = if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        theme.muted()
    };
    let label_style = if enabled {
        Style::default().fg(Color::White)
    } else {
        theme.muted()
    };

    let mut spans = Vec::new();
    for action in CombatActionKind::ALL {
        spans.push(Span::styled(
            format!("[{}]", InputHandler::binding(action)),
            key_style,
        ));
        spans.push(Span::styled(format!(" {}  ", action.label()), label_style));
    }

    if let Some(hint) = gate_hint(view_model) {
        spans.push(Span::styled(
            hint,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    frame.render_widget(paragraph, area);
}

fn gate_hint(view_model: &CombatViewModel) -> Option<&'static str> {
    if view_model.combat.as_ref().is_some_and(|combat| combat.is_spectator) {
        return Some("spectating");
    }
    match view_model.gate {
        GateState::Submitting { .. } => Some("submitting..."),
        GateState::AwaitingRound { .. } => Some("waiting for the round to resolve"),
        GateState::Closed => Some("combat over"),
        GateState::Ready => None,
    }
}
