//! Authoritative battle session representation.
//!
//! One [`BattleSession`] exists per active location key. Runtime layers clone
//! or query it but mutate it exclusively through the
//! [`RoundResolver`](crate::engine::RoundResolver) and submission validation.
mod ids;
mod side;

pub use ids::{PlayerId, SessionKey, SideId};
pub use side::{CombatStats, Combatant, EntitySnapshot, SideState};

use crate::config::BattleConfig;
use crate::env::EntityTemplate;
use crate::error::SessionError;

/// Shape of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleKind {
    /// Two controlled participants.
    Duel,
    /// A controlled challenger against an autonomous opponent.
    Encounter,
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub key: SessionKey,
    pub kind: BattleKind,
    /// Indexed by [`SideId::index`].
    pub sides: [SideState; 2],
    /// Current round number, starting at 1. Only ever increases.
    pub round: u32,
    /// Unix milliseconds at which the round timer resolves this round.
    pub round_deadline_ms: u64,
    /// Unix milliseconds at which the battle started.
    pub started_at_ms: u64,
}

impl BattleSession {
    /// Creates a session after checking its shape and side invariants.
    pub fn new(
        key: SessionKey,
        kind: BattleKind,
        challenger: SideState,
        opponent: SideState,
        started_at_ms: u64,
        round_deadline_ms: u64,
    ) -> Result<Self, SessionError> {
        let session = Self {
            key,
            kind,
            sides: [challenger, opponent],
            round: 1,
            round_deadline_ms,
            started_at_ms,
        };
        session.validate(&BattleConfig::default())?;
        Ok(session)
    }

    /// Starts a duel between two controlled sides.
    pub fn duel(
        key: SessionKey,
        challenger: SideState,
        opponent: SideState,
        started_at_ms: u64,
        round_deadline_ms: u64,
    ) -> Result<Self, SessionError> {
        if challenger.combatant.player().is_some()
            && challenger.combatant.player() == opponent.combatant.player()
        {
            return Err(SessionError::SelfDuel);
        }
        Self::new(
            key,
            BattleKind::Duel,
            challenger,
            opponent,
            started_at_ms,
            round_deadline_ms,
        )
    }

    /// Starts an encounter between a controlled side and an entity template.
    pub fn encounter(
        key: SessionKey,
        challenger: SideState,
        entity: &EntityTemplate,
        started_at_ms: u64,
        round_deadline_ms: u64,
    ) -> Result<Self, SessionError> {
        let opponent = SideState::autonomous(entity)?;
        Self::new(
            key,
            BattleKind::Encounter,
            challenger,
            opponent,
            started_at_ms,
            round_deadline_ms,
        )
    }

    pub fn side(&self, id: SideId) -> &SideState {
        &self.sides[id.index()]
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut SideState {
        &mut self.sides[id.index()]
    }

    /// Which side a player controls, if any.
    pub fn side_of(&self, player: PlayerId) -> Option<SideId> {
        SideId::BOTH
            .into_iter()
            .find(|&id| self.side(id).combatant.player() == Some(player))
    }

    /// Whether every side has its action for this round settled.
    pub fn all_ready(&self) -> bool {
        self.sides.iter().all(SideState::is_ready)
    }

    pub fn is_encounter(&self) -> bool {
        self.kind == BattleKind::Encounter
    }

    /// Checks every invariant a persisted session must satisfy.
    pub fn validate(&self, config: &BattleConfig) -> Result<(), SessionError> {
        let [challenger, opponent] = &self.sides;
        let shape_ok = match self.kind {
            BattleKind::Duel => {
                !challenger.combatant.is_autonomous() && !opponent.combatant.is_autonomous()
            }
            BattleKind::Encounter => {
                !challenger.combatant.is_autonomous() && opponent.combatant.is_autonomous()
            }
        };
        if !shape_ok || self.round == 0 {
            return Err(SessionError::ShapeMismatch);
        }
        let max_ticks = config.status_ticks.max(BattleConfig::DEFAULT_STATUS_TICKS);
        for id in SideId::BOTH {
            self.side(id).validate(id, max_ticks)?;
        }
        Ok(())
    }
}
