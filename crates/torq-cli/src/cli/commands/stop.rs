//! `torq stop <hash>` – suspend a torrent.

use anyhow::{bail, Result};
use torq_core::api::Command;
use torq_core::store::Store;
use torq_core::torrent::Status;

use super::try_daemon;

pub async fn run_stop(store: &Store, hash: &str) -> Result<()> {
    if try_daemon(&Command::Stop { hash: hash.into() }).await? {
        println!("Stopped {hash}");
        return Ok(());
    }

    // No daemon: persisting STOPPED directly is enough; the record is
    // the source of truth and nothing is running.
    let Some(mut info) = store.get_torrent(hash).await? else {
        bail!("torrent {hash} not found");
    };
    info.status = Status::Stopped;
    store.put_torrent(&info).await?;
    println!("Stopped {hash}");
    Ok(())
}
