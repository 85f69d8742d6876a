//! Per-key write serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use battle_core::SessionKey;

/// One async mutex per session key.
///
/// Every read-modify-write of a session holds its key's guard for the whole
/// load, decide, persist sequence. Different keys never contend.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionKey, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: &SessionKey) -> OwnedMutexGuard<()> {
        let lock = {
            // A poisoned map only means another task panicked mid-insert; the
            // map itself is still usable.
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Only the map references an idle lock.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        lock.lock_owned().await
    }
}
