//! Store tests (in-memory database).

use crate::label::Label;
use crate::store::open_memory;
use crate::torrent::{Status, TorrentInfo};

fn sample(hash: &str) -> TorrentInfo {
    TorrentInfo {
        hash: hash.to_string(),
        name: format!("{hash}.iso"),
        magnet: format!("magnet:?xt=urn:btih:{hash}"),
        total_bytes: 2048,
        status: Status::Queued,
        label_id: None,
        time_added: 100,
    }
}

#[tokio::test]
async fn torrent_roundtrip_all_fields() {
    let store = open_memory().await.unwrap();
    let mut info = sample("aaaa");
    info.label_id = Some("lbl".into());
    info.status = Status::Seeding;
    store.put_torrent(&info).await.unwrap();

    let back = store.get_torrent("aaaa").await.unwrap().expect("exists");
    assert_eq!(back, info);
}

#[tokio::test]
async fn torrent_roundtrip_empty_label() {
    let store = open_memory().await.unwrap();
    let info = sample("bbbb");
    store.put_torrent(&info).await.unwrap();
    let back = store.get_torrent("bbbb").await.unwrap().expect("exists");
    assert!(back.label_id.is_none());
    assert_eq!(back, info);
}

#[tokio::test]
async fn put_torrent_is_upsert() {
    let store = open_memory().await.unwrap();
    let mut info = sample("cccc");
    store.put_torrent(&info).await.unwrap();
    info.status = Status::Stopped;
    info.total_bytes = 9000;
    store.put_torrent(&info).await.unwrap();

    let back = store.get_torrent("cccc").await.unwrap().expect("exists");
    assert_eq!(back.status, Status::Stopped);
    assert_eq!(back.total_bytes, 9000);
    assert_eq!(store.all_torrents().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_torrent_reports_presence() {
    let store = open_memory().await.unwrap();
    store.put_torrent(&sample("dddd")).await.unwrap();
    assert!(store.delete_torrent("dddd").await.unwrap());
    assert!(!store.delete_torrent("dddd").await.unwrap());
    assert!(store.get_torrent("dddd").await.unwrap().is_none());
}

#[tokio::test]
async fn backlog_pops_in_fifo_order() {
    let store = open_memory().await.unwrap();
    store.enqueue("a").await.unwrap();
    store.enqueue("b").await.unwrap();
    store.enqueue("c").await.unwrap();

    assert_eq!(store.pop_first_queued().await.unwrap().as_deref(), Some("a"));
    assert_eq!(store.pop_first_queued().await.unwrap().as_deref(), Some("b"));
    assert_eq!(store.pop_first_queued().await.unwrap().as_deref(), Some("c"));
    assert_eq!(store.pop_first_queued().await.unwrap(), None);
}

#[tokio::test]
async fn remove_queued_deletes_matching_entries() {
    let store = open_memory().await.unwrap();
    store.enqueue("a").await.unwrap();
    store.enqueue("b").await.unwrap();
    store.enqueue("a").await.unwrap();

    assert_eq!(store.remove_queued("a").await.unwrap(), 2);
    assert_eq!(store.remove_queued("missing").await.unwrap(), 0);
    assert_eq!(store.queued_hashes().await.unwrap(), vec!["b".to_string()]);
}

#[tokio::test]
async fn pop_consumes_the_entry_exactly_once() {
    let store = open_memory().await.unwrap();
    store.enqueue("only").await.unwrap();
    assert_eq!(
        store.pop_first_queued().await.unwrap().as_deref(),
        Some("only")
    );
    assert!(store.queued_hashes().await.unwrap().is_empty());
    assert_eq!(store.pop_first_queued().await.unwrap(), None);
}

#[tokio::test]
async fn label_crud_roundtrip() {
    let store = open_memory().await.unwrap();
    let label = Label {
        id: "l1".into(),
        name: "linux".into(),
        color: "#cc0000".into(),
        move_to: Some("/srv/iso".into()),
    };
    store.put_label(&label).await.unwrap();
    assert_eq!(store.get_label("l1").await.unwrap(), Some(label.clone()));
    assert_eq!(store.all_labels().await.unwrap(), vec![label]);

    assert!(store.delete_label("l1").await.unwrap());
    assert!(!store.delete_label("l1").await.unwrap());
    assert!(store.get_label("l1").await.unwrap().is_none());
}

#[tokio::test]
async fn torrents_with_label_filters() {
    let store = open_memory().await.unwrap();
    let mut tagged = sample("t1");
    tagged.label_id = Some("l1".into());
    let mut other = sample("t2");
    other.time_added = 200;
    store.put_torrent(&tagged).await.unwrap();
    store.put_torrent(&other).await.unwrap();

    let with_label = store.torrents_with_label("l1").await.unwrap();
    assert_eq!(with_label.len(), 1);
    assert_eq!(with_label[0].hash, "t1");
}
