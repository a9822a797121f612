//! Torrent execution engine seam.
//!
//! The peer-wire/DHT transfer machinery is an external collaborator; the
//! core only needs the operations below. A simulated backend lives in
//! [`sim`] so the daemon and tests run end to end without a network.

pub mod sim;

use std::sync::Arc;

use async_trait::async_trait;

use crate::magnet::Magnet;

/// Wire-level counters reported by the engine for one torrent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferStats {
    pub bytes_up: i64,
    pub bytes_down: i64,
    pub active_peers: u32,
    pub total_peers: u32,
}

/// One torrent held by the engine.
#[async_trait]
pub trait TorrentHandle: Send + Sync {
    /// Resolves once the torrent's metadata (name, size) is known. Callers
    /// bound this with a deadline; the engine itself may wait forever.
    async fn metadata_ready(&self);

    /// Display name. Only meaningful after [`Self::metadata_ready`].
    fn name(&self) -> String;

    /// Payload size in bytes. Only meaningful after [`Self::metadata_ready`].
    fn total_bytes(&self) -> i64;

    /// Start (or resume) transferring the payload.
    fn begin_transfer(&self);

    fn bytes_completed(&self) -> i64;

    fn stats(&self) -> TransferStats;

    /// Drop the torrent from the engine, keeping its files on disk. Open
    /// handles are kept to a minimum while torrents sit in the backlog.
    fn release(&self);
}

/// The engine itself: submit by magnet, look up by info-hash.
#[async_trait]
pub trait TorrentEngine: Send + Sync {
    async fn submit(&self, magnet: &Magnet) -> anyhow::Result<Arc<dyn TorrentHandle>>;

    fn lookup(&self, info_hash: &str) -> Option<Arc<dyn TorrentHandle>>;
}
