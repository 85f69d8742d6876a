//! Combat resolution system.
//!
//! Pure functions for resolving one attack direction. All randomness comes
//! from the caller's [`RandomSource`](crate::env::RandomSource).
//!
//! # Core Functions
//!
//! - `resolve_attack`: barrier, dodge, crit, defense and support bonus
//! - `apply_hp_delta`: clamp an HP change into `[0, max_hp]`

pub mod damage;

pub use damage::{AttackInput, AttackOutcome, resolve_attack};

/// Apply a signed HP change, clamped to `[0, max_hp]`.
pub fn apply_hp_delta(current_hp: u32, max_hp: u32, loss: u32, gain: u32) -> u32 {
    let next = current_hp as i64 - loss as i64 + gain as i64;
    next.clamp(0, max_hp as i64) as u32
}
