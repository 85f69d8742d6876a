//! Public API surface for clients of the runtime.
//!
//! Downstream consumers drive battles through [`BattleHandle`] and handle
//! failures via [`RuntimeError`].

mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{BattleHandle, Participant, Submitted};
