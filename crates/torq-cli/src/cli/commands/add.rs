//! `torq add <magnet>` – track a new torrent.

use anyhow::{bail, Result};
use torq_core::api::Command;
use torq_core::magnet;
use torq_core::store::Store;
use torq_core::torrent::{Status, TorrentInfo};

use super::try_daemon;

pub async fn run_add(store: &Store, uri: &str) -> Result<()> {
    let magnet = magnet::parse(uri)?;

    // A live daemon fetches metadata and queues immediately.
    if try_daemon(&Command::Add { magnet: uri.into() }).await? {
        println!("Added {}", magnet.info_hash);
        return Ok(());
    }

    // No daemon: record the torrent as PENDING; the next `torq run`
    // fetches its metadata at bootstrap and queues it.
    match store.get_torrent(&magnet.info_hash).await? {
        Some(existing) if existing.status != Status::Pending => {
            bail!("torrent {} already added", existing.hash)
        }
        Some(_) => {}
        None => {
            let info = TorrentInfo::pending(
                &magnet.info_hash,
                uri,
                magnet.display_name.as_deref(),
                now(),
            );
            store.put_torrent(&info).await?;
        }
    }
    println!(
        "Added {} (pending; it will be queued when the daemon runs)",
        magnet.info_hash
    );
    Ok(())
}

fn now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
