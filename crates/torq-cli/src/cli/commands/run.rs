//! `torq run` – run the daemon.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use torq_core::config::TorqConfig;
use torq_core::daemon::Daemon;
use torq_core::engine::sim::SimEngine;
use torq_core::engine::TorrentEngine;
use torq_core::events::Event;
use torq_core::store::Store;

use crate::cli::control_socket;

// Simulated swarm parameters until a real BitTorrent backend is bound.
const SIM_TOTAL_BYTES: i64 = 256 << 20;
const SIM_RATE_BYTES_PER_SEC: i64 = 16 << 20;

pub async fn run_daemon(cfg: TorqConfig, store: Store) -> Result<()> {
    let engine: Arc<dyn TorrentEngine> =
        Arc::new(SimEngine::new(SIM_TOTAL_BYTES, SIM_RATE_BYTES_PER_SEC));
    let daemon = Daemon::new(cfg.clone(), store, engine);

    if let Ok(socket_path) = control_socket::socket_path() {
        if control_socket::spawn_control_listener(daemon.api(), &socket_path).is_ok() {
            tracing::debug!(path = %socket_path.display(), "control socket listening");
        }
    }

    // Console progress: one line per torrent at most every 500 ms.
    let mut events = daemon.events().subscribe();
    const PROGRESS_INTERVAL_MS: u128 = 500;
    tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;

        let mut last_print = Instant::now();
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                // Dropped progress lines don't matter, keep listening.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            match event {
                Event::TorrentProgress(p) => {
                    if last_print.elapsed().as_millis() < PROGRESS_INTERVAL_MS {
                        continue;
                    }
                    let short_hash: String = p.hash.chars().take(12).collect();
                    let down_mib = p.bytes_completed as f64 / 1_048_576.0;
                    let rate_mib = p.bps_down as f64 / 1_048_576.0;
                    println!(
                        "{}  {:.1} MiB down  {:.2} MiB/s  {} peers  ratio {:.2}",
                        short_hash, down_mib, rate_mib, p.active_peers, p.ratio
                    );
                    last_print = Instant::now();
                }
                Event::TorrentInfo(info) => {
                    println!("{}  -> {}", info.name, info.status.as_str());
                }
                _ => {}
            }
        }
    });

    println!(
        "torq daemon running (max_active = {}, seed_ratio = {})",
        cfg.max_active, cfg.seed_ratio
    );
    daemon.run().await
}
