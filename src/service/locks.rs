//! Per-worker mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::WorkerId;

/// One async lock per worker, created on first use.
///
/// Holding a worker's guard serializes every read-compute-commit sequence
/// for that worker; different workers never contend.
#[derive(Debug, Default)]
pub struct WorkerLocks {
    locks: Mutex<HashMap<WorkerId, Arc<AsyncMutex<()>>>>,
}

impl WorkerLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of `worker`.
    pub async fn acquire(&self, worker: &WorkerId) -> OwnedMutexGuard<()> {
        let lock = {
            // Map inserts cannot leave the table half-updated.
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            Arc::clone(locks.entry(worker.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of workers that have ever been locked.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .map(|locks| locks.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    /// Returns true when no worker has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
