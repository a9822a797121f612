//! Post-completion payload relocation.
//!
//! When a finished torrent's label carries a move destination, the payload
//! is moved there and a symlink is left at the original path so the engine
//! can keep seeding without duplicating storage. Failures are logged, not
//! fatal.

use std::path::Path;

use anyhow::{bail, Result};

use crate::store::Store;
use crate::torrent::TorrentInfo;

/// Apply the label's move destination, if any. Never fails the caller.
pub(super) async fn relocate_completed(store: &Store, download_dir: &Path, info: &TorrentInfo) {
    let Some(label_id) = info.label_id.as_deref() else {
        return;
    };
    let label = match store.get_label(label_id).await {
        Ok(Some(label)) => label,
        Ok(None) => return,
        Err(err) => {
            tracing::warn!(hash = %info.hash, "label lookup for relocation failed: {err:#}");
            return;
        }
    };
    let Some(dest_dir) = label.move_destination() else {
        return;
    };
    if info.name.is_empty() {
        return;
    }

    if let Err(err) = move_and_link(download_dir, Path::new(dest_dir), &info.name).await {
        tracing::warn!(hash = %info.hash, "relocation failed: {err:#}");
    }
}

async fn move_and_link(download_dir: &Path, dest_dir: &Path, name: &str) -> Result<()> {
    let old_path = download_dir.join(name);
    let new_path = dest_dir.join(name);

    // Already relocated on an earlier pass.
    if let Ok(meta) = tokio::fs::symlink_metadata(&old_path).await {
        if meta.file_type().is_symlink() {
            return Ok(());
        }
    }

    tokio::fs::create_dir_all(dest_dir).await?;
    if tokio::fs::metadata(&new_path).await.is_ok() {
        bail!("destination {} already exists", new_path.display());
    }
    tokio::fs::rename(&old_path, &new_path).await?;

    #[cfg(unix)]
    tokio::fs::symlink(&new_path, &old_path).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::store::open_memory;
    use crate::torrent::{Status, TorrentInfo};

    fn info_with_label(name: &str, label_id: &str) -> TorrentInfo {
        TorrentInfo {
            hash: "abcd".into(),
            name: name.into(),
            magnet: "magnet:?xt=urn:btih:abcd".into(),
            total_bytes: 4,
            status: Status::Done,
            label_id: Some(label_id.into()),
            time_added: 0,
        }
    }

    #[tokio::test]
    async fn moves_payload_and_links_back() {
        let tmp = tempfile::tempdir().unwrap();
        let downloads = tmp.path().join("downloads");
        let dest = tmp.path().join("archive");
        tokio::fs::create_dir_all(&downloads).await.unwrap();
        tokio::fs::write(downloads.join("file.iso"), b"data")
            .await
            .unwrap();

        let store = open_memory().await.unwrap();
        store
            .put_label(&Label {
                id: "l1".into(),
                name: "iso".into(),
                color: String::new(),
                move_to: Some(dest.to_string_lossy().into_owned()),
            })
            .await
            .unwrap();

        let info = info_with_label("file.iso", "l1");
        relocate_completed(&store, &downloads, &info).await;

        let moved = tokio::fs::read(dest.join("file.iso")).await.unwrap();
        assert_eq!(moved, b"data");
        let link_meta = tokio::fs::symlink_metadata(downloads.join("file.iso"))
            .await
            .unwrap();
        assert!(link_meta.file_type().is_symlink());

        // A second pass sees the symlink and leaves everything alone.
        relocate_completed(&store, &downloads, &info).await;
        assert_eq!(
            tokio::fs::read(dest.join("file.iso")).await.unwrap(),
            b"data"
        );
    }

    #[tokio::test]
    async fn no_label_or_destination_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let store = open_memory().await.unwrap();

        let mut info = info_with_label("file.iso", "missing-label");
        relocate_completed(&store, tmp.path(), &info).await;

        info.label_id = None;
        relocate_completed(&store, tmp.path(), &info).await;

        store
            .put_label(&Label {
                id: "plain".into(),
                name: "plain".into(),
                color: String::new(),
                move_to: None,
            })
            .await
            .unwrap();
        info.label_id = Some("plain".into());
        relocate_completed(&store, tmp.path(), &info).await;
    }

    #[tokio::test]
    async fn existing_destination_keeps_original_payload() {
        let tmp = tempfile::tempdir().unwrap();
        let downloads = tmp.path().join("downloads");
        let dest = tmp.path().join("archive");
        tokio::fs::create_dir_all(&downloads).await.unwrap();
        tokio::fs::create_dir_all(&dest).await.unwrap();
        tokio::fs::write(downloads.join("file.iso"), b"new")
            .await
            .unwrap();
        tokio::fs::write(dest.join("file.iso"), b"old").await.unwrap();

        let store = open_memory().await.unwrap();
        store
            .put_label(&Label {
                id: "l1".into(),
                name: "iso".into(),
                color: String::new(),
                move_to: Some(dest.to_string_lossy().into_owned()),
            })
            .await
            .unwrap();

        relocate_completed(&store, &downloads, &info_with_label("file.iso", "l1")).await;

        // Relocation refused; both payloads untouched.
        assert_eq!(
            tokio::fs::read(downloads.join("file.iso")).await.unwrap(),
            b"new"
        );
        assert_eq!(tokio::fs::read(dest.join("file.iso")).await.unwrap(), b"old");
    }
}
