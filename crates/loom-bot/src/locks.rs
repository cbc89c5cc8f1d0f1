//! Per-scope mutual exclusion.
//!
//! A command loads, changes and saves the story. Two commands for the same
//! scope must not interleave, or the later save silently drops the earlier
//! one's turn. Different scopes never wait on each other.

use std::collections::HashMap;
use std::sync::Arc;

use loom_store::ScopeId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One lock per story instance, created on first use.
#[derive(Debug, Default)]
pub struct ScopeLocks {
    locks: Mutex<HashMap<ScopeId, Arc<Mutex<()>>>>,
}

impl ScopeLocks {
    /// An empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `scope` is free and hold it until the guard drops.
    ///
    /// Entries nobody holds or waits on are dropped first, so the table
    /// only keeps scopes that are in use.
    pub async fn acquire(&self, scope: &ScopeId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(scope.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of scopes currently tracked.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Whether no scope is tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
