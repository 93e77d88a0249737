//! Key binding overlay.
use combat_core::CombatActionKind;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::input::InputHandler;

pub fn render(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = CombatActionKind::ALL
        .iter()
        .enumerate()
        .map(|(index, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {} / {}  ", InputHandler::binding(*action), index + 1),
                    key_style,
                ),
                Span::raw(action.label()),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(
        "One action per round. Input unlocks when the next round opens.",
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  q / Ctrl+C  ", key_style),
        Span::raw("Leave the arena"),
    ]));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
