//! Torrent commands: add, stop, force, delete.

use crate::error::ApiError;
use crate::events::Event;
use crate::magnet;
use crate::store::unix_timestamp;
use crate::torrent::{Status, TorrentInfo};

use super::Api;

impl Api {
    /// Track a new magnet link. The record is created PENDING before the
    /// metadata fetch so a crash or timeout leaves something bootstrap can
    /// retry; once metadata arrives the record turns QUEUED and joins the
    /// backlog.
    pub async fn add_magnet(&self, uri: &str) -> Result<(), ApiError> {
        let magnet = magnet::parse(uri).map_err(|e| ApiError::InvalidMagnet(e.to_string()))?;

        let info = match self.store.get_torrent(&magnet.info_hash).await? {
            Some(existing) if existing.status == Status::Pending => existing,
            Some(existing) => return Err(ApiError::AlreadyAdded(existing.hash)),
            None => {
                let info = TorrentInfo::pending(
                    &magnet.info_hash,
                    uri,
                    magnet.display_name.as_deref(),
                    unix_timestamp(),
                );
                self.store.put_torrent(&info).await?;
                self.events.broadcast(Event::TorrentInfo(info.clone()));
                info
            }
        };

        self.queue_pending(info).await
    }

    /// Fetch metadata for a PENDING record and move it into the backlog.
    /// Also used by bootstrap to retry records whose fetch never finished.
    pub async fn queue_pending(&self, mut info: TorrentInfo) -> Result<(), ApiError> {
        let handle = match self.engine.lookup(&info.hash) {
            Some(handle) => handle,
            None => {
                let magnet =
                    magnet::parse(&info.magnet).map_err(|e| ApiError::InvalidMagnet(e.to_string()))?;
                self.engine
                    .submit(&magnet)
                    .await
                    .map_err(|e| ApiError::Engine(e.to_string()))?
            }
        };

        if tokio::time::timeout(self.metadata_timeout, handle.metadata_ready())
            .await
            .is_err()
        {
            return Err(ApiError::MetadataTimeout(info.hash));
        }
        info.name = handle.name();
        info.total_bytes = handle.total_bytes();
        info.status = Status::Queued;
        self.store.put_torrent(&info).await?;
        self.events.broadcast(Event::TorrentInfo(info.clone()));

        // The torrent may sit in the backlog a while; keep engine handles
        // to a minimum until it is admitted.
        handle.release();

        self.queue.add(&info.hash).await?;
        Ok(())
    }

    /// Suspend a torrent. The stop token ends a running worker quickly;
    /// the persisted STOPPED status is what makes the decision durable.
    pub async fn stop(&self, hash: &str) -> Result<(), ApiError> {
        let mut info = self
            .store
            .get_torrent(hash)
            .await?
            .ok_or_else(|| ApiError::TorrentNotFound(hash.to_string()))?;

        self.control.request_stop(hash);
        info.status = Status::Stopped;
        self.store.put_torrent(&info).await?;
        self.events.broadcast(Event::TorrentInfo(info));
        Ok(())
    }

    /// Admit a torrent immediately, bypassing the backlog and the
    /// concurrency ceiling.
    pub async fn force(&self, hash: &str) -> Result<(), ApiError> {
        if self.store.get_torrent(hash).await?.is_none() {
            return Err(ApiError::TorrentNotFound(hash.to_string()));
        }
        self.queue.force_next(hash);
        Ok(())
    }

    /// Forget a torrent: stop its worker, drop the record and any backlog
    /// entry, and optionally delete the payload.
    pub async fn delete(&self, hash: &str, with_data: bool) -> Result<(), ApiError> {
        let info = self
            .store
            .get_torrent(hash)
            .await?
            .ok_or_else(|| ApiError::TorrentNotFound(hash.to_string()))?;

        self.control.request_stop(hash);
        self.store.delete_torrent(hash).await?;
        self.queue.remove(hash).await?;
        self.events.broadcast(Event::TorrentDeleted(hash.to_string()));

        if with_data && !info.name.is_empty() {
            let payload = self.download_dir.join(&info.name);
            if let Err(err) = remove_payload(&payload).await {
                tracing::warn!(hash = %hash, "payload delete failed: {err:#}");
            }
        }
        Ok(())
    }
}

/// Delete a payload path that may be a directory or a single file.
async fn remove_payload(path: &std::path::Path) -> std::io::Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(_) => match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        },
    }
}
