//! Panel for one fighter: name, element, HP gauge and status effects.
use client_frontend_core::{FighterView, PresentationMapper};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

/// Render `fighter` under `title`. A shaking fighter is drawn one column
/// to the right.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    fighter: &FighterView,
    theme: &RatatuiTheme,
) {
    let area = if fighter.is_shaking && area.width > 2 {
        Rect {
            x: area.x + 1,
            width: area.width - 1,
            ..area
        }
    } else {
        area
    };

    let border_style = if fighter.is_flashing {
        theme.flash()
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {title}: {} ", fighter.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Element and readiness
            Constraint::Length(1), // HP gauge
            Constraint::Min(0),    // Status effects
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(summary_line(fighter, theme)), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(theme.style_health(fighter.hp_percent))
        .percent(fighter.hp_percent.min(100))
        .label(format!("{}/{}", fighter.hp.max(0), fighter.max_hp));
    frame.render_widget(gauge, rows[1]);

    if !fighter.status_effects.is_empty() {
        let effects: Vec<Span> = fighter
            .status_effects
            .iter()
            .map(|effect| {
                Span::styled(
                    format!("{}({}) ", effect.kind, effect.turns_left),
                    Style::default().fg(Color::LightMagenta),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(effects)), rows[2]);
    }
}

fn summary_line(fighter: &FighterView, theme: &RatatuiTheme) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(element) = &fighter.element {
        spans.push(Span::styled(
            element.as_str().to_uppercase(),
            theme.style_element(element),
        ));
        spans.push(Span::raw(" "));
    }

    let state = if fighter.is_fainted {
        Span::styled(
            "FAINTED",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if fighter.has_acted {
        Span::styled("action chosen", theme.emphasize_current(Style::default()))
    } else {
        Span::styled("choosing...", theme.muted())
    };
    spans.push(state);

    Line::from(spans)
}
