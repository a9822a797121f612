//! Label commands.
//!
//! Free functions over (store, events) so the CLI can run them against
//! the database directly when no daemon is up.

use crate::error::ApiError;
use crate::events::{Event, Events};
use crate::label::Label;
use crate::store::Store;

/// Create or update a label. A fresh id is minted when none is given.
pub async fn update_label(
    store: &Store,
    events: &Events,
    id: Option<String>,
    name: &str,
    color: Option<String>,
    move_to: Option<String>,
) -> Result<Label, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::EmptyLabelName);
    }

    let label = match id {
        Some(id) => {
            let existing = store
                .get_label(&id)
                .await?
                .ok_or_else(|| ApiError::LabelNotFound(id.clone()))?;
            Label {
                id,
                name: name.to_string(),
                color: color.unwrap_or(existing.color),
                move_to: move_to.or(existing.move_to),
            }
        }
        None => Label {
            id: uuid::Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            color: color.unwrap_or_default(),
            move_to,
        },
    };

    store.put_label(&label).await?;
    events.broadcast(Event::LabelUpdate(label.clone()));
    Ok(label)
}

/// Delete a label and clear it from every referencing torrent (cascading
/// unset, not a cascading delete).
pub async fn delete_label(store: &Store, events: &Events, id: &str) -> Result<(), ApiError> {
    if !store.delete_label(id).await? {
        return Err(ApiError::LabelNotFound(id.to_string()));
    }
    events.broadcast(Event::LabelDeleted(id.to_string()));

    for mut info in store.torrents_with_label(id).await? {
        info.label_id = None;
        store.put_torrent(&info).await?;
        events.broadcast(Event::TorrentInfo(info));
    }
    Ok(())
}

/// Assign a label to a torrent, or clear it with `None`. Assignment
/// requires the label to exist.
pub async fn set_label(
    store: &Store,
    events: &Events,
    hash: &str,
    label_id: Option<String>,
) -> Result<(), ApiError> {
    if let Some(id) = label_id.as_deref() {
        if store.get_label(id).await?.is_none() {
            return Err(ApiError::LabelNotFound(id.to_string()));
        }
    }

    let mut info = store
        .get_torrent(hash)
        .await?
        .ok_or_else(|| ApiError::TorrentNotFound(hash.to_string()))?;
    info.label_id = label_id;
    store.put_torrent(&info).await?;
    events.broadcast(Event::TorrentInfo(info));
    Ok(())
}
