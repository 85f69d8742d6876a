//! Round timers.
//!
//! At most one timer is outstanding per session key. A timer is bound to the
//! round it was scheduled for; when it fires it only reports `(key, round)`
//! to the [`TimerWorker`], which hands the fire to the coordinator. Whether
//! the fire still matters is decided there, under the key lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use battle_core::SessionKey;

use crate::resolver::BattleCoordinator;

/// Current wall-clock time in unix milliseconds.
pub(crate) fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// A round deadline that passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFired {
    pub key: SessionKey,
    pub round: u32,
}

struct TimerEntry {
    id: u64,
    round: u32,
    deadline_ms: u64,
    task: JoinHandle<()>,
}

/// Outstanding round timers, one per key.
pub struct RoundTimers {
    entries: Arc<Mutex<HashMap<SessionKey, TimerEntry>>>,
    next_id: AtomicU64,
    fired_tx: mpsc::Sender<TimerFired>,
}

impl RoundTimers {
    pub fn new(fired_tx: mpsc::Sender<TimerFired>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
            fired_tx,
        }
    }

    /// Arm the timer for `key`, replacing (and aborting) any existing one.
    ///
    /// A deadline already in the past fires right away.
    pub fn schedule(&self, key: SessionKey, round: u32, deadline_ms: u64) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let delay = Duration::from_millis(deadline_ms.saturating_sub(now_ms()));

        // Held across the spawn so the task cannot look for its entry before
        // it is inserted.
        let Ok(mut entries) = self.entries.lock() else {
            warn!(target: "runtime::timers", key = %key, round, "timer table poisoned; timer not armed");
            return;
        };

        let task = {
            let entries = Arc::clone(&self.entries);
            let fired_tx = self.fired_tx.clone();
            let key = key.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;

                let current = match entries.lock() {
                    Ok(mut entries) => {
                        let current = entries.get(&key).is_some_and(|entry| entry.id == id);
                        if current {
                            entries.remove(&key);
                        }
                        current
                    }
                    Err(_) => false,
                };
                if !current {
                    return;
                }

                debug!(target: "runtime::timers", key = %key, round, "round timer fired");
                if fired_tx.send(TimerFired { key, round }).await.is_err() {
                    debug!(target: "runtime::timers", "timer worker stopped; fire dropped");
                }
            })
        };

        let previous = entries.insert(
            key.clone(),
            TimerEntry {
                id,
                round,
                deadline_ms,
                task,
            },
        );
        if let Some(previous) = previous {
            previous.task.abort();
            debug!(
                target: "runtime::timers",
                key = %key,
                replaced_round = previous.round,
                round,
                "replaced round timer"
            );
        }
    }

    /// Disarm the timer for `key`, if any.
    pub fn cancel(&self, key: &SessionKey) {
        if let Ok(mut entries) = self.entries.lock()
            && let Some(entry) = entries.remove(key)
        {
            entry.task.abort();
            debug!(target: "runtime::timers", key = %key, round = entry.round, "cancelled round timer");
        }
    }

    /// Round and deadline of the pending timer for `key`.
    pub fn pending(&self, key: &SessionKey) -> Option<(u32, u64)> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(key)
            .map(|entry| (entry.round, entry.deadline_ms))
    }
}

impl Drop for RoundTimers {
    fn drop(&mut self) {
        if let Ok(mut entries) = self.entries.lock() {
            for (_, entry) in entries.drain() {
                entry.task.abort();
            }
        }
    }
}

/// Background task that turns timer fires into round resolutions.
///
/// Holds the coordinator weakly: once every handle is gone the timers are
/// dropped, the channel closes and the loop ends.
pub struct TimerWorker {
    coordinator: Weak<BattleCoordinator>,
    fired_rx: mpsc::Receiver<TimerFired>,
}

impl TimerWorker {
    pub fn new(coordinator: Weak<BattleCoordinator>, fired_rx: mpsc::Receiver<TimerFired>) -> Self {
        Self {
            coordinator,
            fired_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(TimerFired { key, round }) = self.fired_rx.recv().await {
            let Some(coordinator) = self.coordinator.upgrade() else {
                break;
            };
            tokio::spawn(async move {
                coordinator.on_round_timer(key, round).await;
            });
        }
        debug!(target: "runtime::timers", "timer worker shutting down");
    }
}
