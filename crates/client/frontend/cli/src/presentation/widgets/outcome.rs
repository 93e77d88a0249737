//! Victory/defeat overlay.
use client_frontend_core::{CombatOutcome, PresentationMapper};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, outcome: CombatOutcome, theme: &RatatuiTheme) {
    let style = theme.style_outcome(outcome);
    let (banner, subtitle) = match outcome {
        CombatOutcome::Victory => ("VICTORY", "The arena is yours."),
        CombatOutcome::Defeat => ("DEFEAT", "Better luck next time."),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(banner, style)),
        Line::from(""),
        Line::from(subtitle),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
