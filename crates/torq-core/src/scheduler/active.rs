//! Concurrency-safe membership set for admitted torrents.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// The set of info-hashes currently holding an admission slot. Written by
/// the scheduler control loop at yield time and by `done` from worker exit
/// paths; its size *is* the admission counter.
#[derive(Clone, Default)]
pub struct ActiveSet {
    inner: Arc<RwLock<HashSet<String>>>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the hash was already a member.
    pub fn insert(&self, hash: &str) -> bool {
        self.inner.write().unwrap().insert(hash.to_string())
    }

    /// Returns true if the hash was a member.
    pub fn remove(&self, hash: &str) -> bool {
        self.inner.write().unwrap().remove(hash)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.inner.read().unwrap().contains(hash)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
