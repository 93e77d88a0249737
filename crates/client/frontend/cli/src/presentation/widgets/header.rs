//! Header with round, world clock and energy.
use client_frontend_core::CombatViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, view_model: &CombatViewModel) {
    let mut spans = Vec::new();

    match &view_model.combat {
        Some(combat) => {
            spans.push(Span::raw("Round: "));
            spans.push(Span::styled(
                combat.round.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                combat.status.to_string(),
                Style::default().fg(Color::LightGreen),
            ));
            if combat.is_spectator {
                spans.push(Span::styled(
                    " [SPECTATING]",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }
        None => spans.push(Span::styled(
            "Waiting for combat...",
            Style::default().fg(Color::DarkGray),
        )),
    }

    if let Some(time) = &view_model.header.world_time {
        spans.push(Span::raw(" | World: "));
        spans.push(Span::styled(time.clock(), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", time.period)));
        if let Some(weather) = &time.weather {
            spans.push(Span::raw(format!(" ({weather})")));
        }
    }

    if let Some(energy) = &view_model.header.energy {
        let color = if energy.is_depleted() {
            Color::Red
        } else {
            Color::LightBlue
        };
        spans.push(Span::raw(" | Energy: "));
        spans.push(Span::styled(
            format!("{}/{}", energy.current, energy.max),
            Style::default().fg(color),
        ));
        if let Some(seconds) = energy.next_regen_seconds {
            spans.push(Span::raw(format!(" (+1 in {seconds}s)")));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Arena"));

    frame.render_widget(paragraph, area);
}
