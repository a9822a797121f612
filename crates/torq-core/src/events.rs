//! Best-effort event fan-out.
//!
//! State changes and progress snapshots are published on a broadcast
//! channel. Sends never block; with no subscribers (or lagging ones) the
//! events are simply dropped. A client transport would subscribe here.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::label::Label;
use crate::torrent::{Progress, TorrentInfo};

/// Closed set of broadcast messages, serialized as tagged JSON for the
/// wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    #[serde(rename = "TORRENT_INFO")]
    TorrentInfo(TorrentInfo),
    #[serde(rename = "TORRENT_PROGRESS")]
    TorrentProgress(Progress),
    #[serde(rename = "TORRENT_DELETED")]
    TorrentDeleted(String),
    #[serde(rename = "LABEL_UPDATE")]
    LabelUpdate(Label),
    #[serde(rename = "LABEL_DELETED")]
    LabelDeleted(String),
}

#[derive(Clone)]
pub struct Events {
    tx: broadcast::Sender<Event>,
}

impl Events {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. A send with no subscribers is
    /// not an error.
    pub fn broadcast(&self, event: Event) {
        let _ = self.tx.send(event);
    }
}
