//! `torq remove <hash>` – forget a torrent, optionally deleting its data.

use anyhow::{bail, Result};
use torq_core::api::Command;
use torq_core::config::TorqConfig;
use torq_core::store::Store;

use super::try_daemon;

pub async fn run_remove(cfg: &TorqConfig, store: &Store, hash: &str, with_data: bool) -> Result<()> {
    if try_daemon(&Command::Delete {
        hash: hash.into(),
        with_data,
    })
    .await?
    {
        println!("Removed {hash}");
        return Ok(());
    }

    // No daemon: clear the record and any backlog entry directly.
    let Some(info) = store.get_torrent(hash).await? else {
        bail!("torrent {hash} not found");
    };
    store.delete_torrent(hash).await?;
    store.remove_queued(hash).await?;

    if with_data && !info.name.is_empty() {
        let payload = cfg.download_dir.join(&info.name);
        if tokio::fs::remove_dir_all(&payload).await.is_err() {
            if let Err(err) = tokio::fs::remove_file(&payload).await {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(hash = %hash, "payload delete failed: {err}");
                }
            }
        }
    }
    println!("Removed {hash}");
    Ok(())
}
