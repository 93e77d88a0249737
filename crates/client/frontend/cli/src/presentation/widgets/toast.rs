//! Short-lived notifications stacked in the top-right corner.
use client_frontend_core::{PresentationMapper, Toast};
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::presentation::theme::RatatuiTheme;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, toasts: &[Toast], theme: &RatatuiTheme) {
    let width = TOAST_WIDTH.min(area.width);
    let max_visible = (area.height / TOAST_HEIGHT) as usize;

    // Newest on top.
    for (slot, toast) in toasts.iter().rev().take(max_visible).enumerate() {
        let rect = Rect::new(
            area.right() - width,
            area.y + slot as u16 * TOAST_HEIGHT,
            width,
            TOAST_HEIGHT,
        );
        let style = theme.style_message(toast.level);
        let paragraph = Paragraph::new(toast.text.as_str())
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(style));

        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph, rect);
    }
}
