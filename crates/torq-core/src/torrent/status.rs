//! Torrent lifecycle status, stored as an uppercase string.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked torrent.
///
/// `PENDING → QUEUED → ACTIVE → {DONE ⇄ SEEDING} | STOPPED`. PENDING is
/// pre-queue (metadata not fetched yet); STOPPED is a user-forced
/// suspension with no automatic way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Queued,
    Active,
    Done,
    Seeding,
    Stopped,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Queued => "QUEUED",
            Status::Active => "ACTIVE",
            Status::Done => "DONE",
            Status::Seeding => "SEEDING",
            Status::Stopped => "STOPPED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Status::Pending),
            "QUEUED" => Some(Status::Queued),
            "ACTIVE" => Some(Status::Active),
            "DONE" => Some(Status::Done),
            "SEEDING" => Some(Status::Seeding),
            "STOPPED" => Some(Status::Stopped),
            _ => None,
        }
    }
}
