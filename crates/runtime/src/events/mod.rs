//! Topic-based event system for flexible event routing.
//!
//! Consumers (a chat front end, a logger, tests) subscribe to the topics they
//! care about and render round summaries or battle results on their own terms.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, RoundEvent};
