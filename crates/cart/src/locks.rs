//! Per-owner mutual exclusion.

use std::sync::Arc;

use common::Owner;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<Owner, Arc<Mutex<()>>>;

/// One async mutex per owner.
///
/// Holding an owner's guard serializes every read-modify-write on that
/// owner's cart. Different owners never contend with each other. An entry
/// lives only while some task holds or waits for it.
#[derive(Debug, Clone, Default)]
pub struct OwnerLocks {
    locks: Arc<LockMap>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock for `owner`.
    pub async fn lock(&self, owner: &Owner) -> OwnerGuard {
        // The shard guard must be released before awaiting.
        let mutex = self.locks.entry(owner.clone()).or_default().clone();
        let guard = mutex.lock_owned().await;
        OwnerGuard {
            guard: Some(guard),
            owner: owner.clone(),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of owners currently holding or waiting for a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one owner's cart, released on drop.
#[derive(Debug)]
pub struct OwnerGuard {
    guard: Option<OwnedMutexGuard<()>>,
    owner: Owner,
    locks: Arc<LockMap>,
}

impl Drop for OwnerGuard {
    fn drop(&mut self) {
        // Release the mutex first so its only remaining handle is the map's.
        self.guard.take();
        self.locks
            .remove_if(&self.owner, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
