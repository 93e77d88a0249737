//! Footer with key bindings for the current mode.
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{AppMode, AppState};

pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState) {
    let line = match app_state.mode {
        AppMode::Combat => Line::from(vec![
            Span::raw("[a/d/s/f or 1-4] Act | "),
            Span::raw("[?] Help | "),
            Span::raw("[q] Quit"),
        ]),
        AppMode::Help => Line::from(vec![Span::raw("[ESC/?] Close help | [q] Quit")]),
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::Gray)),
        area,
    );
}
