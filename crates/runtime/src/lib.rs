//! Runtime orchestration for simultaneous-round battles.
//!
//! This crate wires the pure rules of `battle-core` to storage, timers and
//! events. Consumers embed [`Runtime`] and drive battles through
//! [`BattleHandle`]: start a duel or an encounter, submit actions, forfeit,
//! query state and subscribe to round and battle events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`rewards`] rolls and pays encounter rewards
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
//! - `workers` keeps round timers and per-key locks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod rewards;
pub mod runtime;

mod resolver;
mod workers;

pub use api::{BattleHandle, Participant, Result, RuntimeError, Submitted};
pub use events::{BattleEvent, Event, EventBus, RoundEvent, Topic};
pub use oracle::CatalogOracleImpl;
pub use repository::{
    ActiveTask, FileSessionRepository, InMemoryPlayerRepo, InMemorySessionRepo, PlayerRecord,
    PlayerRepository, RepositoryError, SessionRecord, SessionRepository, TaskGoal,
};
pub use rewards::RewardGrant;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
