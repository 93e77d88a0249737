//! Cloneable façade for frontends talking to the session.
//!
//! [`SessionHandle`] hides the event bus and the poller invalidation
//! plumbing. Frontends subscribe to events and submit combat actions through
//! it; they never hold the poll tasks themselves.
use std::collections::HashMap;
use std::sync::Arc;

use client_api::{CombatActionResponse, GameApi};
use combat_core::CombatActionKind;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;

use crate::error::{Result, SessionError};
use crate::events::{Feed, SessionBus, SessionEvent};

#[derive(Clone)]
pub struct SessionHandle {
    api: Arc<dyn GameApi>,
    bus: SessionBus,
    refresh: Arc<HashMap<Feed, Arc<Notify>>>,
    challenge_id: Option<String>,
    player_id: Option<String>,
}

impl SessionHandle {
    pub(crate) fn new(
        api: Arc<dyn GameApi>,
        bus: SessionBus,
        refresh: HashMap<Feed, Arc<Notify>>,
        challenge_id: Option<String>,
        player_id: Option<String>,
    ) -> Self {
        Self {
            api,
            bus,
            refresh: Arc::new(refresh),
            challenge_id,
            player_id,
        }
    }

    pub fn api(&self) -> Arc<dyn GameApi> {
        Arc::clone(&self.api)
    }

    pub fn challenge_id(&self) -> Option<&str> {
        self.challenge_id.as_deref()
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Subscribe to every session event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe()
    }

    /// Invalidate a feed so its poller fetches right away.
    ///
    /// Returns `false` when the feed is not running in this session.
    pub fn refresh(&self, feed: Feed) -> bool {
        match self.refresh.get(&feed) {
            Some(notify) => {
                notify.notify_one();
                true
            }
            None => false,
        }
    }

    /// Submit a combat action and invalidate the combat feed on success.
    ///
    /// The outcome is also published as [`SessionEvent::ActionAccepted`] or
    /// [`SessionEvent::ActionRejected`] so UI loops can react without
    /// awaiting this call.
    pub async fn submit_action(&self, action: CombatActionKind) -> Result<CombatActionResponse> {
        let Some(challenge_id) = self.challenge_id.as_deref() else {
            self.bus.publish(SessionEvent::ActionRejected {
                action,
                message: SessionError::MissingChallenge.user_message(),
            });
            return Err(SessionError::MissingChallenge);
        };

        tracing::info!(challenge = challenge_id, %action, "submitting combat action");

        match self.api.submit_combat_action(challenge_id, action).await {
            Ok(response) => {
                self.bus.publish(SessionEvent::ActionAccepted {
                    action,
                    combat: response.combat.clone(),
                    message: response.message.clone(),
                });
                self.refresh(Feed::Combat);
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(challenge = challenge_id, %action, %error, "combat action rejected");
                self.bus.publish(SessionEvent::ActionRejected {
                    action,
                    message: error.user_message(),
                });
                Err(error.into())
            }
        }
    }

    /// Fire-and-forget variant of [`Self::submit_action`] for UI loops.
    pub fn dispatch_action(&self, action: CombatActionKind) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            // Outcome already reaches subscribers through the bus.
            let _ = handle.submit_action(action).await;
        })
    }
}
