//! Client-facing handle for interacting with the runtime.
//!
//! Provides a cloneable façade over the battle coordinator so the command
//! layer (a chat bot, a CLI, tests) can start battles, submit actions,
//! forfeit, query state and subscribe to events.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use battle_core::{BattleSession, PlayerId, RoundResolution, SessionKey, Submission};

use crate::api::Result;
use crate::events::{Event, EventBus, Topic};
use crate::resolver::BattleCoordinator;

/// A player entering a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub player: PlayerId,
    /// When set, an autopilot plays these chips for the player.
    pub stand_in: Option<Vec<String>>,
}

impl Participant {
    /// A stand-in participant whose actions the autopilot picks from `chips`.
    pub fn stand_in<I, S>(player: PlayerId, chips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player,
            stand_in: Some(chips.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<PlayerId> for Participant {
    fn from(player: PlayerId) -> Self {
        Self {
            player,
            stand_in: None,
        }
    }
}

/// Result of an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    /// Queued; the round waits for the other side or the timer.
    Queued { round: u32 },
    /// The submission completed the round and it resolved immediately.
    Resolved(RoundResolution),
}

/// Client-facing handle for interacting with the runtime.
#[derive(Clone)]
pub struct BattleHandle {
    coordinator: Arc<BattleCoordinator>,
}

impl BattleHandle {
    pub(crate) fn new(coordinator: Arc<BattleCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Start a duel between two registered players under `key`.
    pub async fn start_duel(
        &self,
        key: impl Into<SessionKey>,
        challenger: impl Into<Participant>,
        opponent: impl Into<Participant>,
    ) -> Result<BattleSession> {
        self.coordinator
            .start_duel(key.into(), challenger.into(), opponent.into())
            .await
    }

    /// Start an encounter between a registered player and a catalog entity.
    pub async fn start_encounter(
        &self,
        key: impl Into<SessionKey>,
        challenger: impl Into<Participant>,
        entity: &str,
    ) -> Result<BattleSession> {
        self.coordinator
            .start_encounter(key.into(), challenger.into(), entity)
            .await
    }

    /// Submit `chip`, optionally powered by the `support` chip.
    pub async fn submit_action(
        &self,
        key: &SessionKey,
        actor: PlayerId,
        chip: &str,
        support: Option<&str>,
    ) -> Result<Submitted> {
        let submission = match support {
            Some(support) => Submission::supported(support, chip),
            None => Submission::chip(chip),
        };
        self.coordinator.submit_action(key, actor, submission).await
    }

    pub async fn forfeit(&self, key: &SessionKey, actor: PlayerId) -> Result<()> {
        self.coordinator.forfeit(key, actor).await
    }

    /// Current snapshot of the battle under `key`, if one is active.
    pub async fn query_state(&self, key: &SessionKey) -> Result<Option<BattleSession>> {
        self.coordinator.query_state(key)
    }

    /// Re-arm round timers for every persisted session after a restart.
    pub async fn recover(&self) -> Result<usize> {
        self.coordinator.recover().await
    }

    /// Round and deadline of the timer currently armed for `key`.
    pub fn pending_timer(&self, key: &SessionKey) -> Option<(u32, u64)> {
        self.coordinator.pending_timer(key)
    }

    /// Subscribe to a specific event topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.coordinator.events().subscribe(topic)
    }

    /// Subscribe to multiple event topics at once.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.coordinator.events().subscribe_multiple(topics)
    }

    /// Get a reference to the event bus.
    pub fn event_bus(&self) -> &EventBus {
        self.coordinator.events()
    }
}
