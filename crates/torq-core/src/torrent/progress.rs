//! Live transfer progress for one torrent.

use serde::{Deserialize, Serialize};

use crate::engine::TransferStats;

/// Snapshot of an active torrent's transfer activity. Never persisted;
/// rebuilt by each lifecycle worker and broadcast once per tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub hash: String,
    pub bytes_completed: i64,
    pub bytes_uploaded: i64,
    pub bps_up: i64,
    pub bps_down: i64,
    pub active_peers: u32,
    pub total_peers: u32,
    pub ratio: f64,
}

impl Progress {
    pub fn new(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            ..Self::default()
        }
    }

    /// Fold one tick of engine stats into the snapshot. Rates are averaged
    /// with the previous tick's delta so the numbers wobble less.
    pub fn update(&mut self, stats: &TransferStats, bytes_completed: i64) {
        self.bps_up = (self.bps_up + (stats.bytes_up - self.bytes_uploaded)) / 2;
        self.bytes_uploaded = stats.bytes_up;

        self.bps_down = (self.bps_down + (bytes_completed - self.bytes_completed)) / 2;
        self.bytes_completed = bytes_completed;

        self.active_peers = stats.active_peers;
        self.total_peers = stats.total_peers;

        self.ratio = if self.bytes_completed == 0 {
            0.0
        } else {
            self.bytes_uploaded as f64 / self.bytes_completed as f64
        };
    }

    /// Zero the activity fields (rates, peers) while keeping the byte
    /// counters. Broadcast on worker exit so observers see the torrent go
    /// idle.
    pub fn reset(&mut self) {
        self.bps_up = 0;
        self.bps_down = 0;
        self.active_peers = 0;
        self.total_peers = 0;
    }
}
