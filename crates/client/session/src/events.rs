//! Session event types and the broadcast bus carrying them.

use client_api::{EnergyStatus, WorldTime};
use combat_core::{CombatActionKind, CombatState};
use tokio::sync::broadcast;

/// Polled endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Feed {
    Combat,
    WorldTime,
    Energy,
}

/// Everything a frontend learns from the session.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Fresh combat snapshot from a poll.
    Combat(CombatState),
    WorldTime(WorldTime),
    Energy(EnergyStatus),
    /// Server accepted a combat action.
    ///
    /// `combat` carries the resolved state when the server returned one
    /// directly in the mutation response.
    ActionAccepted {
        action: CombatActionKind,
        combat: Option<CombatState>,
        message: Option<String>,
    },
    /// Server or transport rejected a combat action.
    ActionRejected {
        action: CombatActionKind,
        message: String,
    },
    /// A poll failed; the feed tries again on its next tick.
    FetchFailed { feed: Feed, message: String },
}

impl SessionEvent {
    pub fn feed(&self) -> Option<Feed> {
        match self {
            SessionEvent::Combat(_) => Some(Feed::Combat),
            SessionEvent::WorldTime(_) => Some(Feed::WorldTime),
            SessionEvent::Energy(_) => Some(Feed::Energy),
            SessionEvent::FetchFailed { feed, .. } => Some(*feed),
            SessionEvent::ActionAccepted { .. } | SessionEvent::ActionRejected { .. } => None,
        }
    }
}

/// Broadcast bus shared by pollers, the handle and subscribers.
#[derive(Clone, Debug)]
pub struct SessionBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: SessionEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers yet - this is normal, not an error
            tracing::trace!("No subscribers for session event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let bus = SessionBus::with_capacity(4);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(SessionEvent::FetchFailed {
            feed: Feed::Energy,
            message: "offline".into(),
        });

        for rx in [&mut first, &mut second] {
            let event = rx.recv().await.unwrap();
            assert_eq!(event.feed(), Some(Feed::Energy));
        }
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = SessionBus::with_capacity(1);
        bus.publish(SessionEvent::Energy(EnergyStatus::default()));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn feed_labels() {
        assert_eq!(Feed::WorldTime.to_string(), "world_time");
    }
}
