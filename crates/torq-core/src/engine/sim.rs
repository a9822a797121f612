//! Simulated transfer backend.
//!
//! Stands in for a real BitTorrent client behind [`TorrentEngine`]:
//! metadata is available immediately and the payload "arrives" at a fixed
//! rate once the transfer begins. Used by the integration tests and by
//! `torq run` until a real backend is bound.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Instant;

use async_trait::async_trait;

use crate::magnet::Magnet;

use super::{TorrentEngine, TorrentHandle, TransferStats};

type Registry = RwLock<HashMap<String, Arc<SimTorrent>>>;

pub struct SimEngine {
    total_bytes: i64,
    rate_bytes_per_sec: i64,
    torrents: Arc<Registry>,
}

impl SimEngine {
    /// Every simulated torrent has the same payload size and arrival rate.
    pub fn new(total_bytes: i64, rate_bytes_per_sec: i64) -> Self {
        Self {
            total_bytes,
            rate_bytes_per_sec: rate_bytes_per_sec.max(1),
            torrents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TorrentEngine for SimEngine {
    async fn submit(&self, magnet: &Magnet) -> anyhow::Result<Arc<dyn TorrentHandle>> {
        let mut torrents = self.torrents.write().unwrap();
        let torrent = torrents
            .entry(magnet.info_hash.clone())
            .or_insert_with(|| {
                Arc::new(SimTorrent {
                    hash: magnet.info_hash.clone(),
                    name: magnet
                        .display_name
                        .clone()
                        .unwrap_or_else(|| magnet.info_hash.clone()),
                    total_bytes: self.total_bytes,
                    rate_bytes_per_sec: self.rate_bytes_per_sec,
                    started: Mutex::new(None),
                    transferring: AtomicBool::new(false),
                    registry: Arc::downgrade(&self.torrents),
                })
            })
            .clone();
        Ok(torrent)
    }

    fn lookup(&self, info_hash: &str) -> Option<Arc<dyn TorrentHandle>> {
        let torrents = self.torrents.read().unwrap();
        torrents
            .get(info_hash)
            .cloned()
            .map(|t| t as Arc<dyn TorrentHandle>)
    }
}

struct SimTorrent {
    hash: String,
    name: String,
    total_bytes: i64,
    rate_bytes_per_sec: i64,
    started: Mutex<Option<Instant>>,
    transferring: AtomicBool,
    registry: Weak<Registry>,
}

impl SimTorrent {
    fn elapsed_bytes(&self) -> i64 {
        let started = self.started.lock().unwrap();
        match *started {
            Some(at) => {
                let transferred = (at.elapsed().as_secs_f64() * self.rate_bytes_per_sec as f64) as i64;
                transferred.min(self.total_bytes)
            }
            None => 0,
        }
    }
}

#[async_trait]
impl TorrentHandle for SimTorrent {
    async fn metadata_ready(&self) {}

    fn name(&self) -> String {
        self.name.clone()
    }

    fn total_bytes(&self) -> i64 {
        self.total_bytes
    }

    fn begin_transfer(&self) {
        let mut started = self.started.lock().unwrap();
        if started.is_none() {
            *started = Some(Instant::now());
        }
        self.transferring.store(true, Ordering::Relaxed);
    }

    fn bytes_completed(&self) -> i64 {
        self.elapsed_bytes()
    }

    fn stats(&self) -> TransferStats {
        let completed = self.elapsed_bytes();
        let transferring = self.transferring.load(Ordering::Relaxed);
        TransferStats {
            // Simulated swarm uploads at half the download volume.
            bytes_up: completed / 2,
            bytes_down: completed,
            active_peers: if transferring { 4 } else { 0 },
            total_peers: if transferring { 12 } else { 0 },
        }
    }

    fn release(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.write().unwrap().remove(&self.hash);
        }
    }
}
