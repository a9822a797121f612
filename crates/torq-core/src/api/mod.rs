//! Typed command surface.
//!
//! Every caller-facing operation is a [`Command`] variant, validated by
//! serde at the transport boundary; the scheduler and lifecycle core
//! never see untyped payloads. Outcomes go back to the requesting caller
//! only; state changes reach everyone through the event stream.

mod labels;
mod torrents;

pub use labels::{delete_label, set_label, update_label};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TorqConfig;
use crate::control::WorkerControl;
use crate::engine::TorrentEngine;
use crate::error::ApiError;
use crate::events::Events;
use crate::scheduler::SchedulerHandle;
use crate::store::Store;

/// Closed set of client commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Add {
        magnet: String,
    },
    Stop {
        hash: String,
    },
    Force {
        hash: String,
    },
    Delete {
        hash: String,
        #[serde(default)]
        with_data: bool,
    },
    SetLabel {
        hash: String,
        label_id: Option<String>,
    },
    UpdateLabel {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        move_to: Option<String>,
    },
    DeleteLabel {
        id: String,
    },
}

/// One-line reply on the control socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn err(err: impl std::fmt::Display) -> Self {
        Self {
            ok: false,
            error: Some(err.to_string()),
        }
    }
}

/// Command handler bound to a running daemon's plumbing.
pub struct Api {
    pub(crate) store: Store,
    pub(crate) engine: Arc<dyn TorrentEngine>,
    pub(crate) events: Events,
    pub(crate) queue: SchedulerHandle,
    pub(crate) control: Arc<WorkerControl>,
    pub(crate) download_dir: PathBuf,
    pub(crate) metadata_timeout: Duration,
}

impl Api {
    pub fn new(
        cfg: &TorqConfig,
        store: Store,
        engine: Arc<dyn TorrentEngine>,
        events: Events,
        queue: SchedulerHandle,
        control: Arc<WorkerControl>,
    ) -> Self {
        Self {
            store,
            engine,
            events,
            queue,
            control,
            download_dir: cfg.download_dir.clone(),
            metadata_timeout: Duration::from_secs(cfg.metadata_timeout_secs.max(1)),
        }
    }

    pub async fn dispatch(&self, command: Command) -> Result<(), ApiError> {
        match command {
            Command::Add { magnet } => self.add_magnet(&magnet).await,
            Command::Stop { hash } => self.stop(&hash).await,
            Command::Force { hash } => self.force(&hash).await,
            Command::Delete { hash, with_data } => self.delete(&hash, with_data).await,
            Command::SetLabel { hash, label_id } => {
                set_label(&self.store, &self.events, &hash, label_id).await
            }
            Command::UpdateLabel {
                id,
                name,
                color,
                move_to,
            } => update_label(&self.store, &self.events, id, &name, color, move_to)
                .await
                .map(|_| ()),
            Command::DeleteLabel { id } => delete_label(&self.store, &self.events, &id).await,
        }
    }
}
