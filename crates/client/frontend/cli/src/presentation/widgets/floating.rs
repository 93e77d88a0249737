//! Floating damage and heal numbers drawn over the fighter panels.
use client_frontend_core::{FloatingNumber, PresentationMapper};
use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, numbers: &[FloatingNumber], theme: &RatatuiTheme) {
    for number in numbers {
        let text = display_text(number);
        let Some(rect) = placement(area, number, text.chars().count() as u16) else {
            continue;
        };
        let paragraph = Paragraph::new(text).style(theme.style_floating(number.color));
        frame.render_widget(paragraph, rect);
    }
}

fn display_text(number: &FloatingNumber) -> String {
    if number.is_crit {
        format!("{}!", number.label())
    } else {
        number.label()
    }
}

/// Cell rectangle of a number whose percent position is centred on its text.
/// `None` when the area cannot hold it.
pub(crate) fn placement(area: Rect, number: &FloatingNumber, width: u16) -> Option<Rect> {
    if area.width < width || area.height == 0 {
        return None;
    }

    let centre = u32::from(area.width) * u32::from(number.x.min(100)) / 100;
    let left = (centre as u16).saturating_sub(width / 2).min(area.width - width);
    let top = (u32::from(area.height - 1) * u32::from(number.y.min(100)) / 100) as u16;

    Some(Rect::new(area.x + left, area.y + top, width, 1))
}
