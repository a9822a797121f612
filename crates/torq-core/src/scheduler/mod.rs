//! Queue admission scheduling.
//!
//! Enforces a global concurrency ceiling over the durable backlog, with a
//! one-shot force-to-front override. All admission accounting happens in
//! the single control loop ([`Scheduler::run`]); workers and command
//! handlers talk to it through a cloneable [`SchedulerHandle`], and one
//! consumer drains admitted hashes from [`Admissions`].

mod active;
mod run;

pub use active::ActiveSet;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::store::Store;

/// The control-loop half. Consumed by [`Scheduler::run`].
pub struct Scheduler {
    store: Store,
    active: ActiveSet,
    force_rx: mpsc::UnboundedReceiver<String>,
    done_rx: mpsc::UnboundedReceiver<()>,
    next_tx: mpsc::Sender<String>,
    poll_interval: Duration,
}

/// Cloneable command surface for the scheduler.
#[derive(Clone)]
pub struct SchedulerHandle {
    store: Store,
    active: ActiveSet,
    force_tx: mpsc::UnboundedSender<String>,
    done_tx: mpsc::UnboundedSender<()>,
}

/// Consumer end: blocking source of admitted hashes, in emission order.
pub struct Admissions {
    rx: mpsc::Receiver<String>,
}

/// Build the scheduler plumbing. `poll_interval` is how often the control
/// loop probes the backlog absent done/force signals.
pub fn new(store: Store, poll_interval: Duration) -> (Scheduler, SchedulerHandle, Admissions) {
    let (force_tx, force_rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = mpsc::unbounded_channel();
    let (next_tx, next_rx) = mpsc::channel(1);
    let active = ActiveSet::new();

    let scheduler = Scheduler {
        store: store.clone(),
        active: active.clone(),
        force_rx,
        done_rx,
        next_tx,
        poll_interval,
    };
    let handle = SchedulerHandle {
        store,
        active,
        force_tx,
        done_tx,
    };
    (scheduler, handle, Admissions { rx: next_rx })
}

impl SchedulerHandle {
    /// Append a hash to the durable backlog tail. Does not check for
    /// duplicates; callers ensure the hash is not already queued or
    /// active.
    pub async fn add(&self, hash: &str) -> Result<()> {
        self.store.enqueue(hash).await
    }

    /// Bypass the backlog and the capacity check; the hash is admitted
    /// ahead of any pending FIFO pop. A hash that is already active is
    /// ignored. Not persisted: bootstrap re-forces previously-ACTIVE
    /// records after a crash.
    pub fn force_next(&self, hash: &str) {
        if self.active.contains(hash) {
            tracing::debug!(hash = %hash, "force ignored, torrent already active");
            return;
        }
        let _ = self.force_tx.send(hash.to_string());
    }

    /// Release the admission slot held by `hash`. Idempotent: only a
    /// current member of the active set frees a slot, so duplicate
    /// completion signals are harmless.
    pub fn done(&self, hash: &str) {
        if self.active.remove(hash) {
            let _ = self.done_tx.send(());
        }
    }

    /// Delete any backlog entry matching `hash`. No effect if the hash is
    /// active or absent.
    pub async fn remove(&self, hash: &str) -> Result<()> {
        self.store.remove_queued(hash).await?;
        Ok(())
    }

    pub fn is_active(&self, hash: &str) -> bool {
        self.active.contains(hash)
    }

    /// Number of admission slots currently held. Always equals the active
    /// set size; the counter is not tracked independently.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Admissions {
    /// Next admitted hash; blocks until the scheduler admits one. Returns
    /// None once the scheduler loop has shut down.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}
