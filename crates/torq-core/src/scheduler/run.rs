//! The scheduler control loop.

use tokio::time::MissedTickBehavior;

use super::Scheduler;

impl Scheduler {
    /// Run admission control until the consumer side is dropped; under
    /// normal operation this never returns.
    ///
    /// The loop wakes on a done signal, a forced admission, or the poll
    /// interval, then pops the oldest backlog entry if a slot is free.
    /// Membership in the active set is the admission count: a hash is
    /// inserted here at the instant it is yielded and removed by
    /// `SchedulerHandle::done`, so the counter cannot drift or go
    /// negative.
    pub async fn run(self, max_active: usize) {
        let Scheduler {
            store,
            active,
            mut force_rx,
            mut done_rx,
            next_tx,
            poll_interval,
        } = self;
        let max_active = max_active.max(1);

        let mut tick = tokio::time::interval(poll_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // Forced admissions outrank done signals and the poll
                // tick, so a forced id is always yielded ahead of any
                // FIFO pop pending at that moment.
                biased;
                Some(hash) = force_rx.recv() => {
                    // Forced admission: ahead of any pending FIFO pop and
                    // exempt from the capacity check (bounded +1
                    // overshoot). Re-check membership here so concurrent
                    // duplicate forces collapse to one admission.
                    if active.insert(&hash) {
                        if let Err(err) = store.remove_queued(&hash).await {
                            tracing::warn!(hash = %hash, "dequeue of forced torrent failed: {err:#}");
                        }
                        if next_tx.send(hash.clone()).await.is_err() {
                            active.remove(&hash);
                            return;
                        }
                    } else {
                        tracing::debug!(hash = %hash, "force ignored, torrent already active");
                    }
                }
                Some(()) = done_rx.recv() => {}
                _ = tick.tick() => {}
            }

            if active.len() >= max_active {
                continue;
            }
            match store.pop_first_queued().await {
                Ok(Some(hash)) => {
                    if active.insert(&hash) {
                        if next_tx.send(hash.clone()).await.is_err() {
                            active.remove(&hash);
                            return;
                        }
                    } else {
                        // Double-Add misuse; dropping the entry keeps the
                        // count equal to the set size.
                        tracing::debug!(hash = %hash, "dropped backlog entry for already-active torrent");
                    }
                }
                Ok(None) => {}
                Err(err) => tracing::warn!("backlog poll failed: {err:#}"),
            }
        }
    }
}
