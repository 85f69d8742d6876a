//! Deterministic combat rules shared by the runtime and offline tools.
//!
//! `battle-core` defines the canonical rules of a simultaneous two-sided round
//! (effect descriptors, damage formula, status ledger, action interpreter,
//! autopilot, session model) and exposes pure APIs. Every session mutation
//! flows through [`engine::RoundResolver`] or [`action::validate_submission`];
//! randomness and catalog lookups are injected by the caller.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod status;

#[cfg(test)]
mod testing;

pub use action::{
    ActionSource, ChipInventory, ConsumedAction, Intent, QueuedAction, Submission, interpret,
    validate_submission,
};
pub use ai::{AiCounters, choose_move};
pub use combat::{AttackInput, AttackOutcome, apply_hp_delta, resolve_attack};
pub use config::BattleConfig;
pub use effect::{EffectDescriptor, EffectKind, EffectKinds};
pub use engine::{BattleOutcome, RoundReport, RoundResolution, RoundResolver, SideReport};
pub use env::{CatalogOracle, EntityTemplate, PcgRng, RandomSource, ScriptedRng};
pub use error::{BattleError, ErrorSeverity, Rejection, SessionError};
pub use state::{
    BattleKind, BattleSession, CombatStats, Combatant, EntitySnapshot, PlayerId, SessionKey,
    SideId, SideState,
};
pub use status::{StatusLedger, StatusStack, TickOutcome};
