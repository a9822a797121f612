//! `torq force <hash>` – admit a torrent immediately.

use anyhow::{bail, Result};
use torq_core::api::Command;

use super::try_daemon;

pub async fn run_force(hash: &str) -> Result<()> {
    if try_daemon(&Command::Force { hash: hash.into() }).await? {
        println!("Forced {hash}");
        return Ok(());
    }
    bail!("forcing needs a running daemon (start one with `torq run`)");
}
