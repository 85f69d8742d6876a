//! Worker tasks that back the runtime orchestration.
//!
//! Round timers fire into the timer worker, which drives resolutions on the
//! coordinator. Per-key locks keep every session mutation single-writer.

mod locks;
mod timers;

pub use locks::SessionLocks;
pub use timers::{RoundTimers, TimerFired, TimerWorker};

pub(crate) use timers::now_ms;
