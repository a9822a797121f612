//! Per-torrent stop tokens.
//!
//! Each lifecycle worker registers a token at spawn; a stop or delete
//! command flips it and the worker's tick loop exits. The durable status
//! reload stays the source of truth for *why* the worker stopped; the
//! token only makes the cancellation path explicit and fast.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Shared registry of info-hash -> stop token.
#[derive(Default)]
pub struct WorkerControl {
    workers: RwLock<HashMap<String, Arc<AtomicBool>>>,
}

impl WorkerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running worker; returns the token its tick loop checks.
    pub fn register(&self, hash: &str) -> Arc<AtomicBool> {
        let token = Arc::new(AtomicBool::new(false));
        self.workers
            .write()
            .unwrap()
            .insert(hash.to_string(), Arc::clone(&token));
        token
    }

    /// Unregister on worker exit (any path).
    pub fn unregister(&self, hash: &str) {
        self.workers.write().unwrap().remove(hash);
    }

    /// Ask a worker to stop. No-op when no worker holds the hash.
    pub fn request_stop(&self, hash: &str) {
        if let Some(token) = self.workers.read().unwrap().get(hash) {
            token.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_registered(&self, hash: &str) -> bool {
        self.workers.read().unwrap().contains_key(hash)
    }
}

/// Default path for the daemon control socket (same XDG state dir as the
/// database).
pub fn default_control_socket_path() -> anyhow::Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("torq")?.get_state_home();
    Ok(dir.join("control.sock"))
}
