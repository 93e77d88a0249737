//! Event loop of the terminal client.
//!
//! The loop multiplexes session events, keyboard input and presenter timers,
//! and redraws only when something visible changed.
mod handlers;
mod r#loop;

pub use r#loop::EventLoop;
