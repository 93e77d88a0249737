//! Utilities for reacting to session events inside UI layers.
use client_session::SessionEvent;

use crate::message::MessageLog;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub const fn from_changed(changed: bool) -> Self {
        Self {
            requires_redraw: changed,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &SessionEvent) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
    fn take_message_log(self) -> MessageLog
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_keeps_redraw() {
        assert!(EventImpact::none().combine(EventImpact::redraw()).requires_redraw);
        assert!(!EventImpact::none().combine(EventImpact::none()).requires_redraw);
        assert_eq!(EventImpact::from_changed(true), EventImpact::redraw());
    }
}
