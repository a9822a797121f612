//! `torq status` – show all tracked torrents.

use std::collections::HashMap;

use anyhow::Result;
use torq_core::store::Store;

pub async fn run_status(store: &Store) -> Result<()> {
    let torrents = store.all_torrents().await?;
    if torrents.is_empty() {
        println!("No torrents tracked.");
        return Ok(());
    }

    let labels: HashMap<String, String> = store
        .all_labels()
        .await?
        .into_iter()
        .map(|l| (l.id, l.name))
        .collect();

    println!(
        "{:<14} {:<9} {:<14} {:<12} NAME",
        "HASH", "STATUS", "SIZE", "LABEL"
    );
    for t in torrents {
        let short_hash: String = t.hash.chars().take(12).collect();
        let label = t
            .label_id
            .as_ref()
            .and_then(|id| labels.get(id).cloned())
            .unwrap_or_else(|| "-".to_string());
        let size = if t.total_bytes > 0 {
            t.total_bytes.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<14} {:<9} {:<14} {:<12} {}",
            short_hash,
            t.status.as_str(),
            size,
            label,
            t.name
        );
    }
    Ok(())
}
