//! Scripted engine used by unit tests: byte counters are flipped by the
//! test instead of advancing on their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::engine::{TorrentEngine, TorrentHandle, TransferStats};
use crate::magnet::Magnet;

#[derive(Default)]
pub(crate) struct MockEngine {
    torrents: RwLock<HashMap<String, Arc<MockHandle>>>,
}

impl MockEngine {
    pub(crate) fn add(&self, hash: &str, total_bytes: i64) -> Arc<MockHandle> {
        let handle = Arc::new(MockHandle {
            name: format!("{hash}.iso"),
            total_bytes,
            completed: AtomicI64::new(0),
            uploaded: AtomicI64::new(0),
            started: AtomicBool::new(false),
            released: AtomicBool::new(false),
        });
        self.torrents
            .write()
            .unwrap()
            .insert(hash.to_string(), Arc::clone(&handle));
        handle
    }

    pub(crate) fn drop_torrent(&self, hash: &str) {
        self.torrents.write().unwrap().remove(hash);
    }
}

#[async_trait]
impl TorrentEngine for MockEngine {
    async fn submit(&self, magnet: &Magnet) -> anyhow::Result<Arc<dyn TorrentHandle>> {
        if let Some(handle) = self.lookup(&magnet.info_hash) {
            return Ok(handle);
        }
        Ok(self.add(&magnet.info_hash, 0))
    }

    fn lookup(&self, info_hash: &str) -> Option<Arc<dyn TorrentHandle>> {
        let torrents = self.torrents.read().unwrap();
        torrents
            .get(info_hash)
            .filter(|h| !h.released.load(Ordering::Relaxed))
            .cloned()
            .map(|h| h as Arc<dyn TorrentHandle>)
    }
}

pub(crate) struct MockHandle {
    pub(crate) name: String,
    pub(crate) total_bytes: i64,
    pub(crate) completed: AtomicI64,
    pub(crate) uploaded: AtomicI64,
    pub(crate) started: AtomicBool,
    pub(crate) released: AtomicBool,
}

#[async_trait]
impl TorrentHandle for MockHandle {
    async fn metadata_ready(&self) {}

    fn name(&self) -> String {
        self.name.clone()
    }

    fn total_bytes(&self) -> i64 {
        self.total_bytes
    }

    fn begin_transfer(&self) {
        self.started.store(true, Ordering::Relaxed);
    }

    fn bytes_completed(&self) -> i64 {
        self.completed.load(Ordering::Relaxed)
    }

    fn stats(&self) -> TransferStats {
        TransferStats {
            bytes_up: self.uploaded.load(Ordering::Relaxed),
            bytes_down: self.completed.load(Ordering::Relaxed),
            active_peers: 2,
            total_peers: 4,
        }
    }

    fn release(&self) {
        self.released.store(true, Ordering::Relaxed);
    }
}
