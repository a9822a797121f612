//! Daemon wiring: bootstrap, the scheduler loop, and the consumer that
//! spawns one lifecycle worker per admitted torrent.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::api::Api;
use crate::config::TorqConfig;
use crate::control::WorkerControl;
use crate::engine::TorrentEngine;
use crate::events::Events;
use crate::manager::Manager;
use crate::scheduler::{self, Admissions, Scheduler};
use crate::store::Store;
use crate::torrent::Status;

pub struct Daemon {
    cfg: TorqConfig,
    store: Store,
    events: Events,
    api: Arc<Api>,
    manager: Arc<Manager>,
    scheduler: Scheduler,
    admissions: Admissions,
}

impl Daemon {
    pub fn new(cfg: TorqConfig, store: Store, engine: Arc<dyn TorrentEngine>) -> Self {
        let events = Events::new(256);
        let control = Arc::new(WorkerControl::new());
        let (scheduler, queue, admissions) = scheduler::new(
            store.clone(),
            Duration::from_millis(cfg.queue_poll_ms.max(1)),
        );
        let api = Arc::new(Api::new(
            &cfg,
            store.clone(),
            Arc::clone(&engine),
            events.clone(),
            queue.clone(),
            Arc::clone(&control),
        ));
        let manager = Arc::new(Manager {
            store: store.clone(),
            engine,
            events: events.clone(),
            queue,
            control,
            cfg: cfg.clone(),
        });
        Self {
            cfg,
            store,
            events,
            api,
            manager,
            scheduler,
            admissions,
        }
    }

    /// Command handler for the control socket.
    pub fn api(&self) -> Arc<Api> {
        Arc::clone(&self.api)
    }

    /// Event stream for observers (progress printers, client transports).
    pub fn events(&self) -> Events {
        self.events.clone()
    }

    /// Recover persisted work, then run admission and workers until
    /// interrupted.
    pub async fn run(self) -> Result<()> {
        let Daemon {
            cfg,
            store,
            events: _,
            api,
            manager,
            scheduler,
            mut admissions,
        } = self;

        bootstrap(&store, &api).await?;

        tokio::spawn(scheduler.run(cfg.max_active));
        tokio::spawn(async move {
            while let Some(hash) = admissions.next().await {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.run_torrent(&hash).await });
            }
        });

        tokio::signal::ctrl_c().await?;
        tracing::info!("shutdown requested");
        Ok(())
    }
}

/// Resume persisted state after a restart: previously-ACTIVE torrents are
/// re-admitted ahead of the backlog, PENDING ones retry their metadata
/// fetch, and QUEUED records whose backlog entry was consumed but never
/// finished are re-enqueued. Per-record failures are logged and skipped.
async fn bootstrap(store: &Store, api: &Api) -> Result<()> {
    let queued: HashSet<String> = store.queued_hashes().await?.into_iter().collect();

    for info in store.all_torrents().await? {
        match info.status {
            Status::Active => {
                tracing::info!(hash = %info.hash, "resuming active torrent");
                api.queue.force_next(&info.hash);
            }
            Status::Pending => {
                tracing::info!(hash = %info.hash, "retrying pending torrent");
                if let Err(err) = api.queue_pending(info.clone()).await {
                    tracing::warn!(hash = %info.hash, "pending retry failed: {err}");
                }
            }
            Status::Queued => {
                if !queued.contains(&info.hash) {
                    tracing::info!(hash = %info.hash, "restoring lost backlog entry");
                    if let Err(err) = api.queue.add(&info.hash).await {
                        tracing::warn!(hash = %info.hash, "re-enqueue failed: {err:#}");
                    }
                }
            }
            Status::Done | Status::Seeding | Status::Stopped => {}
        }
    }
    Ok(())
}
