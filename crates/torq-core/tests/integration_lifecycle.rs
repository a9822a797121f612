//! End-to-end: add a magnet, let the scheduler admit it, and drive the
//! lifecycle against the simulated engine on an on-disk store.

use std::sync::Arc;
use std::time::Duration;

use torq_core::api::Api;
use torq_core::config::TorqConfig;
use torq_core::control::WorkerControl;
use torq_core::engine::sim::SimEngine;
use torq_core::engine::TorrentEngine;
use torq_core::events::Events;
use torq_core::manager::Manager;
use torq_core::scheduler;
use torq_core::store::Store;
use torq_core::torrent::Status;

const HASH: &str = "c12fe1c06bba254a9dc9f519b335aa7c1367a88a";
const WAIT: Duration = Duration::from_secs(5);

struct World {
    api: Api,
    store: Store,
}

async fn start(dir: &std::path::Path, cfg: TorqConfig, total_bytes: i64, rate: i64) -> World {
    let store = Store::open_at(dir.join("state/torq.db")).await.unwrap();
    let engine: Arc<dyn TorrentEngine> = Arc::new(SimEngine::new(total_bytes, rate));
    let events = Events::new(64);
    let control = Arc::new(WorkerControl::new());
    let (sched, queue, mut admissions) = scheduler::new(
        store.clone(),
        Duration::from_millis(cfg.queue_poll_ms),
    );

    let api = Api::new(
        &cfg,
        store.clone(),
        Arc::clone(&engine),
        events.clone(),
        queue.clone(),
        Arc::clone(&control),
    );
    let manager = Arc::new(Manager {
        store: store.clone(),
        engine,
        events,
        queue,
        control,
        cfg: cfg.clone(),
    });

    tokio::spawn(sched.run(cfg.max_active));
    tokio::spawn(async move {
        while let Some(hash) = admissions.next().await {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.run_torrent(&hash).await });
        }
    });

    World { api, store }
}

async fn wait_for_status(store: &Store, hash: &str, status: Status) {
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        let current = store.get_torrent(hash).await.unwrap().map(|i| i.status);
        if current == Some(status) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "torrent {hash} stuck in {current:?}, wanted {status:?}"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn fast_cfg(dir: &std::path::Path) -> TorqConfig {
    TorqConfig {
        max_active: 1,
        seed_ratio: 0.0,
        download_dir: dir.join("downloads"),
        queue_poll_ms: 10,
        progress_tick_ms: 10,
        metadata_timeout_secs: 5,
        ..TorqConfig::default()
    }
}

#[tokio::test]
async fn magnet_runs_from_add_to_done() {
    let tmp = tempfile::tempdir().unwrap();
    let world = start(tmp.path(), fast_cfg(tmp.path()), 4096, 4 << 20).await;

    let uri = format!("magnet:?xt=urn:btih:{HASH}&dn=debian-12.iso");
    world.api.add_magnet(&uri).await.unwrap();

    let info = world.store.get_torrent(HASH).await.unwrap().unwrap();
    assert_eq!(info.name, "debian-12.iso");
    assert_eq!(info.total_bytes, 4096);

    // Admission, transfer, completion. Ratio target 0 means no seeding.
    wait_for_status(&world.store, HASH, Status::Done).await;
    assert!(world.store.queued_hashes().await.unwrap().is_empty());
}

#[tokio::test]
async fn backlog_drains_one_at_a_time_to_done() {
    let tmp = tempfile::tempdir().unwrap();
    let world = start(tmp.path(), fast_cfg(tmp.path()), 4096, 4 << 20).await;

    let other = "a".repeat(40);
    world
        .api
        .add_magnet(&format!("magnet:?xt=urn:btih:{HASH}&dn=first.iso"))
        .await
        .unwrap();
    world
        .api
        .add_magnet(&format!("magnet:?xt=urn:btih:{other}&dn=second.iso"))
        .await
        .unwrap();

    wait_for_status(&world.store, HASH, Status::Done).await;
    wait_for_status(&world.store, &other, Status::Done).await;
    assert!(world.store.queued_hashes().await.unwrap().is_empty());
}

#[tokio::test]
async fn stop_command_parks_the_torrent() {
    let tmp = tempfile::tempdir().unwrap();
    // Slow "swarm" so the stop lands mid-transfer.
    let world = start(tmp.path(), fast_cfg(tmp.path()), 1 << 30, 1024).await;

    let uri = format!("magnet:?xt=urn:btih:{HASH}&dn=big.iso");
    world.api.add_magnet(&uri).await.unwrap();
    wait_for_status(&world.store, HASH, Status::Active).await;

    world.api.stop(HASH).await.unwrap();
    wait_for_status(&world.store, HASH, Status::Stopped).await;

    // No automatic way out of STOPPED.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let status = world.store.get_torrent(HASH).await.unwrap().unwrap().status;
    assert_eq!(status, Status::Stopped);
}
