//! Fixed-interval poll workers.
//!
//! Each feed runs in its own task: fetch, publish, wait for the next tick.
//! A [`Notify`] lets callers invalidate a feed so it re-fetches immediately;
//! the interval restarts from that fetch. Failures are published and the
//! feed simply tries again on its next tick.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use client_api::GameApi;
use tokio::sync::Notify;
use tokio::time::{self, MissedTickBehavior};

use crate::events::{Feed, SessionBus, SessionEvent};

/// Something that can be fetched into a [`SessionEvent`].
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    fn feed(&self) -> Feed;

    async fn poll(&self) -> client_api::Result<SessionEvent>;
}

pub struct CombatSource {
    api: Arc<dyn GameApi>,
    challenge_id: String,
}

impl CombatSource {
    pub fn new(api: Arc<dyn GameApi>, challenge_id: impl Into<String>) -> Self {
        Self {
            api,
            challenge_id: challenge_id.into(),
        }
    }
}

#[async_trait]
impl PollSource for CombatSource {
    fn feed(&self) -> Feed {
        Feed::Combat
    }

    async fn poll(&self) -> client_api::Result<SessionEvent> {
        let state = self.api.fetch_combat(&self.challenge_id).await?;
        Ok(SessionEvent::Combat(state))
    }
}

pub struct WorldTimeSource {
    api: Arc<dyn GameApi>,
}

impl WorldTimeSource {
    pub fn new(api: Arc<dyn GameApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PollSource for WorldTimeSource {
    fn feed(&self) -> Feed {
        Feed::WorldTime
    }

    async fn poll(&self) -> client_api::Result<SessionEvent> {
        Ok(SessionEvent::WorldTime(self.api.fetch_world_time().await?))
    }
}

pub struct EnergySource {
    api: Arc<dyn GameApi>,
}

impl EnergySource {
    pub fn new(api: Arc<dyn GameApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PollSource for EnergySource {
    fn feed(&self) -> Feed {
        Feed::Energy
    }

    async fn poll(&self) -> client_api::Result<SessionEvent> {
        Ok(SessionEvent::Energy(self.api.fetch_energy().await?))
    }
}

/// Background task polling one [`PollSource`].
pub struct PollWorker<S> {
    source: S,
    interval: Duration,
    refresh: Arc<Notify>,
    bus: SessionBus,
}

impl<S> PollWorker<S>
where
    S: PollSource,
{
    pub fn new(source: S, interval: Duration, refresh: Arc<Notify>, bus: SessionBus) -> Self {
        Self {
            source,
            interval,
            refresh,
            bus,
        }
    }

    /// Main worker loop. Runs until the task is aborted.
    pub async fn run(self) {
        let feed = self.source.feed();
        tracing::debug!(%feed, interval_ms = self.interval.as_millis() as u64, "poller started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.refresh.notified() => {
                    tracing::trace!(%feed, "feed invalidated");
                    ticker.reset();
                }
            }

            self.poll_once().await;
        }
    }

    async fn poll_once(&self) {
        let feed = self.source.feed();
        match self.source.poll().await {
            Ok(event) => self.bus.publish(event),
            Err(error) => {
                tracing::warn!(%feed, %error, "poll failed");
                self.bus.publish(SessionEvent::FetchFailed {
                    feed,
                    message: error.user_message(),
                });
            }
        }
    }
}
