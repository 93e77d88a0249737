//! Keyboard mapping for the combat screen.
//!
//! The rest of the client never looks at raw `crossterm` events; it only
//! sees [`KeyAction`]s.
use combat_core::CombatActionKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::AppMode;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Submit an action for the open round.
    Submit(CombatActionKind),
    ToggleHelp,
    /// Close the active overlay.
    ExitOverlay,
    None,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Key shown in the action bar for `action`.
    pub fn binding(action: CombatActionKind) -> char {
        match action {
            CombatActionKind::Attack => 'a',
            CombatActionKind::Defend => 'd',
            CombatActionKind::Dodge => 's',
            CombatActionKind::Spell => 'f',
        }
    }

    pub fn handle_key(&self, key: KeyEvent, mode: AppMode) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match mode {
            AppMode::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') => KeyAction::ExitOverlay,
                KeyCode::Char('q') => KeyAction::Quit,
                _ => KeyAction::None,
            },
            AppMode::Combat => match key.code {
                KeyCode::Char(ch) => self.handle_char(ch),
                KeyCode::Esc => KeyAction::Quit,
                _ => KeyAction::None,
            },
        }
    }

    fn handle_char(&self, raw: char) -> KeyAction {
        match raw.to_ascii_lowercase() {
            'q' => KeyAction::Quit,
            '?' | 'h' => KeyAction::ToggleHelp,
            'a' | '1' => KeyAction::Submit(CombatActionKind::Attack),
            'd' | '2' => KeyAction::Submit(CombatActionKind::Defend),
            's' | '3' => KeyAction::Submit(CombatActionKind::Dodge),
            'f' | '4' => KeyAction::Submit(CombatActionKind::Spell),
            _ => KeyAction::None,
        }
    }
}
