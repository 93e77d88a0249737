//! Ratatui rendering of the combat view model.
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod widgets;
