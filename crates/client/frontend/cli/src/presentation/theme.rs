//! Ratatui implementation of [`PresentationMapper`].
use client_frontend_core::{CombatOutcome, FloatColor, MessageLevel, PresentationMapper};
use combat_core::Element;
use ratatui::style::{Color, Modifier, Style};

/// Colour scheme of the terminal client.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    /// Style for a disabled action or hint.
    pub fn muted(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Panel style while a fighter flashes after a critical hit.
    pub fn flash(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }
}

impl PresentationMapper for RatatuiTheme {
    type Style = Style;

    fn style_health(&self, percent: u16) -> Self::Style {
        let color = match percent {
            75.. => Color::Green,
            50..=74 => Color::Yellow,
            25..=49 => Color::LightRed,
            _ => Color::Red,
        };
        Style::default().fg(color)
    }

    fn style_message(&self, level: MessageLevel) -> Self::Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    fn style_floating(&self, color: FloatColor) -> Self::Style {
        match color {
            FloatColor::Damage => Style::default().fg(Color::Red),
            FloatColor::Critical => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            FloatColor::Heal => Style::default().fg(Color::LightGreen),
        }
    }

    fn style_outcome(&self, outcome: CombatOutcome) -> Self::Style {
        let color = match outcome {
            CombatOutcome::Victory => Color::Yellow,
            CombatOutcome::Defeat => Color::Red,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn style_element(&self, element: &Element) -> Self::Style {
        let color = match element {
            Element::Fire => Color::LightRed,
            Element::Water => Color::LightBlue,
            Element::Earth => Color::Rgb(176, 128, 64),
            Element::Air => Color::LightCyan,
            Element::Light => Color::LightYellow,
            Element::Dark => Color::Magenta,
            Element::Other(_) => Color::Gray,
        };
        Style::default().fg(color)
    }

    fn emphasize_current(&self, base_style: Self::Style) -> Self::Style {
        base_style.add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_colour_bands() {
        let theme = RatatuiTheme::new();
        assert_eq!(theme.style_health(100).fg, Some(Color::Green));
        assert_eq!(theme.style_health(75).fg, Some(Color::Green));
        assert_eq!(theme.style_health(60).fg, Some(Color::Yellow));
        assert_eq!(theme.style_health(25).fg, Some(Color::LightRed));
        assert_eq!(theme.style_health(0).fg, Some(Color::Red));
    }
}
