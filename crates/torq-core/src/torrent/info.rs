//! Static metadata for a tracked torrent.

use serde::{Deserialize, Serialize};

use super::Status;

/// Durable per-torrent record. The store is the system of record; readers
/// load a fresh snapshot every scheduling tick instead of caching, so
/// externally-applied changes (a user stop, a relabel) are observed within
/// one tick interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentInfo {
    /// Info-hash, the primary key.
    pub hash: String,
    pub name: String,
    pub magnet: String,
    pub total_bytes: i64,
    pub status: Status,
    #[serde(rename = "labelID")]
    pub label_id: Option<String>,
    pub time_added: i64,
}

impl TorrentInfo {
    /// A freshly submitted torrent: metadata not yet fetched.
    pub fn pending(hash: &str, magnet: &str, name: Option<&str>, time_added: i64) -> Self {
        Self {
            hash: hash.to_string(),
            name: name.unwrap_or(hash).to_string(),
            magnet: magnet.to_string(),
            total_bytes: 0,
            status: Status::Pending,
            label_id: None,
            time_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_keeps_all_fields() {
        let info = TorrentInfo {
            hash: "ab".repeat(20),
            name: "debian-12.iso".into(),
            magnet: format!("magnet:?xt=urn:btih:{}", "ab".repeat(20)),
            total_bytes: 4_000_000_000,
            status: Status::Seeding,
            label_id: Some("lbl1".into()),
            time_added: 1_700_000_000,
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: TorrentInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn json_roundtrip_with_empty_label() {
        let info = TorrentInfo::pending("cafe", "magnet:?xt=urn:btih:cafe", None, 0);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"labelID\""));
        let back: TorrentInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
        assert!(back.label_id.is_none());
    }
}
