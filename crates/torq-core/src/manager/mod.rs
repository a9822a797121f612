//! Per-torrent lifecycle worker.
//!
//! One worker runs per admitted torrent, driving it from admission to a
//! terminal or suspended state: it issues engine commands, broadcasts
//! progress once per tick, and re-reads the durable record every tick so
//! externally-applied changes (a user stop, a relabel) take effect within
//! one interval.

mod relocate;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};

use crate::config::TorqConfig;
use crate::control::WorkerControl;
use crate::engine::TorrentEngine;
use crate::events::{Event, Events};
use crate::magnet;
use crate::scheduler::SchedulerHandle;
use crate::store::Store;
use crate::torrent::{Progress, Status};

/// Shared dependencies for lifecycle workers. The daemon holds one
/// `Manager` and spawns `run_torrent` per admitted hash.
pub struct Manager {
    pub store: Store,
    pub engine: Arc<dyn TorrentEngine>,
    pub events: Events,
    pub queue: SchedulerHandle,
    pub control: Arc<WorkerControl>,
    pub cfg: TorqConfig,
}

impl Manager {
    /// Drive one admitted torrent until it reaches DONE, is stopped, or
    /// fails. Always releases the engine handle, frees the admission slot,
    /// and broadcasts an idle progress record on the way out.
    pub async fn run_torrent(&self, hash: &str) {
        let stop = self.control.register(hash);
        let mut progress = Progress::new(hash);

        if let Err(err) = self.drive(hash, &stop, &mut progress).await {
            tracing::warn!(hash = %hash, "torrent worker exited: {err:#}");
        }

        if let Some(handle) = self.engine.lookup(hash) {
            handle.release();
        }
        self.queue.done(hash);
        progress.reset();
        self.events.broadcast(Event::TorrentProgress(progress));
        self.control.unregister(hash);
    }

    async fn drive(
        &self,
        hash: &str,
        stop: &Arc<AtomicBool>,
        progress: &mut Progress,
    ) -> Result<()> {
        let info = self
            .store
            .get_torrent(hash)
            .await?
            .ok_or_else(|| anyhow!("no record for admitted torrent"))?;

        let handle = match self.engine.lookup(hash) {
            Some(handle) => handle,
            None => {
                let magnet = magnet::parse(&info.magnet)?;
                self.engine.submit(&magnet).await?
            }
        };

        // The engine may wait on the swarm forever; we don't.
        let deadline = Duration::from_secs(self.cfg.metadata_timeout_secs.max(1));
        tokio::time::timeout(deadline, handle.metadata_ready())
            .await
            .map_err(|_| anyhow!("timed out waiting for metadata"))?;

        // Resuming a torrent that was mid-transfer when the daemon went
        // down: start it straight away, the QUEUED branch below won't.
        if info.status == Status::Active {
            handle.begin_transfer();
        }

        let mut tick = tokio::time::interval(Duration::from_millis(self.cfg.progress_tick_ms.max(1)));
        loop {
            tick.tick().await;

            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }

            let Some(handle) = self.engine.lookup(hash) else {
                bail!("engine unexpectedly dropped the torrent");
            };
            progress.update(&handle.stats(), handle.bytes_completed());
            self.events
                .broadcast(Event::TorrentProgress(progress.clone()));

            // Fresh snapshot: the store is the source of truth for
            // externally-applied status changes.
            let mut info = match self.store.get_torrent(hash).await {
                Ok(Some(latest)) => latest,
                Ok(None) => bail!("record deleted while worker was running"),
                Err(err) => {
                    tracing::warn!(hash = %hash, "record reload failed, skipping tick: {err:#}");
                    continue;
                }
            };
            let observed = info.status;

            if info.status == Status::Stopped {
                return Ok(());
            }

            if info.status == Status::Queued {
                handle.begin_transfer();
                info.status = Status::Active;
            }

            if info.status == Status::Active && progress.bytes_completed >= info.total_bytes {
                info.status = Status::Done;
            }

            if info.status == Status::Done {
                if observed != Status::Done {
                    // Transfer just finished: optional relocation, then
                    // free the admission slot. A seeding torrent holds no
                    // slot.
                    relocate::relocate_completed(&self.store, &self.cfg.download_dir, &info).await;
                }
                self.queue.done(hash);
                if enters_seeding(self.cfg.seed_ratio, progress.ratio) {
                    info.status = Status::Seeding;
                }
            }

            if info.status == Status::Seeding
                && self.cfg.seed_ratio > 0.0
                && progress.ratio >= self.cfg.seed_ratio
            {
                info.status = Status::Done;
            }

            if info.status != observed {
                if let Err(err) = self.store.put_torrent(&info).await {
                    tracing::warn!(hash = %hash, "status persist failed: {err:#}");
                } else {
                    self.events.broadcast(Event::TorrentInfo(info.clone()));
                }
            }

            if info.status == Status::Done {
                return Ok(());
            }
        }
    }
}

/// Whether a completed torrent should keep seeding. Target 0 never seeds;
/// a negative target seeds without limit; a positive target seeds until
/// the ratio reaches it.
fn enters_seeding(target: f64, ratio: f64) -> bool {
    target < 0.0 || (target > 0.0 && ratio < target)
}
