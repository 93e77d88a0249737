//! Widgets composing the combat screen.
pub mod actions;
pub mod fighter;
pub mod floating;
pub mod footer;
pub mod header;
pub mod help;
pub mod messages;
pub mod outcome;
pub mod toast;
