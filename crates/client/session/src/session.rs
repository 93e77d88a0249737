//! Session lifecycle: spawning and tearing down poll workers.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use client_api::GameApi;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::events::{Feed, SessionBus};
use crate::handle::SessionHandle;
use crate::poller::{CombatSource, EnergySource, PollSource, PollWorker, WorldTimeSource};

/// Owns the poll tasks of one client session.
///
/// Dropping the session aborts every poller, which is the equivalent of a
/// screen unmounting and clearing its intervals.
pub struct Session {
    handle: SessionHandle,
    tasks: Vec<(Feed, JoinHandle<()>)>,
}

impl Session {
    /// Spawn the configured pollers. Must be called inside a tokio runtime.
    pub fn start(api: Arc<dyn GameApi>, config: SessionConfig) -> Self {
        let bus = SessionBus::with_capacity(config.event_buffer);
        let mut refresh = HashMap::new();
        let mut tasks = Vec::new();

        if let Some(challenge_id) = config.challenge_id.clone() {
            let source = CombatSource::new(Arc::clone(&api), challenge_id);
            spawn_feed(source, config.polling.combat, &bus, &mut refresh, &mut tasks);
        } else {
            tracing::info!("No challenge configured; combat feed disabled");
        }

        if let Some(interval) = config.polling.world_time {
            let source = WorldTimeSource::new(Arc::clone(&api));
            spawn_feed(source, interval, &bus, &mut refresh, &mut tasks);
        }

        if let Some(interval) = config.polling.energy {
            let source = EnergySource::new(Arc::clone(&api));
            spawn_feed(source, interval, &bus, &mut refresh, &mut tasks);
        }

        tracing::info!(
            feeds = tasks.len(),
            challenge = ?config.challenge_id,
            player = ?config.player_id,
            "Session started"
        );

        let handle = SessionHandle::new(api, bus, refresh, config.challenge_id, config.player_id);
        Self { handle, tasks }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn feeds(&self) -> Vec<Feed> {
        self.tasks.iter().map(|(feed, _)| *feed).collect()
    }

    /// Abort every poller and wait for the tasks to finish.
    pub async fn shutdown(mut self) {
        for (feed, task) in std::mem::take(&mut self.tasks) {
            task.abort();
            let _ = task.await;
            tracing::debug!(%feed, "poller stopped");
        }
        tracing::info!("Session shut down");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for (_, task) in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_feed<S>(
    source: S,
    interval: Duration,
    bus: &SessionBus,
    refresh: &mut HashMap<Feed, Arc<Notify>>,
    tasks: &mut Vec<(Feed, JoinHandle<()>)>,
) where
    S: PollSource,
{
    let feed = source.feed();
    let notify = Arc::new(Notify::new());
    let worker = PollWorker::new(source, interval, Arc::clone(&notify), bus.clone());

    refresh.insert(feed, notify);
    tasks.push((feed, tokio::spawn(worker.run())));
}
