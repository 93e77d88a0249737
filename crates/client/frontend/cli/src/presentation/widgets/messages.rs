//! Combat log panel.
use client_frontend_core::{MessageEntry, PresentationMapper};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListDirection, ListItem},
};

/// Render the log with the newest entry at the bottom.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    messages: &[MessageEntry],
    panel_height: u16,
    theme: &T,
) {
    let mut items: Vec<ListItem> = messages
        .iter()
        .map(|entry| ListItem::new(format_message(entry)).style(theme.style_message(entry.level)))
        .collect();

    while items.len() < panel_height as usize {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Combat Log"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

/// Entries carry the round they happened in.
fn format_message(entry: &MessageEntry) -> String {
    match entry.timestamp {
        Some(round) => format!("[R{}] {}", round, entry.text),
        None => entry.text.clone(),
    }
}
