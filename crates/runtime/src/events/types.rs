//! Event payloads published on the bus.

use serde::{Deserialize, Serialize};

use battle_core::{BattleKind, BattleOutcome, PlayerId, RoundReport, SessionKey, SideId};

use crate::rewards::RewardGrant;

/// Round lifecycle events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A round resolved and the battle continues.
    Resolved {
        key: SessionKey,
        report: RoundReport,
        next_deadline_ms: u64,
    },
    /// Nobody acted before the deadline; the same round stays open.
    Extended {
        key: SessionKey,
        round: u32,
        deadline_ms: u64,
    },
}

/// Battle lifecycle events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        key: SessionKey,
        kind: BattleKind,
        challenger: String,
        opponent: String,
        deadline_ms: u64,
    },
    /// The final round resolved. The session is already deleted.
    Ended {
        key: SessionKey,
        outcome: BattleOutcome,
        report: RoundReport,
    },
    Forfeited {
        key: SessionKey,
        by: PlayerId,
        side: SideId,
    },
    /// Rewards paid to the winner of an encounter.
    RewardsGranted {
        key: SessionKey,
        player: PlayerId,
        grant: RewardGrant,
    },
}

impl BattleEvent {
    pub fn key(&self) -> &SessionKey {
        match self {
            BattleEvent::Started { key, .. }
            | BattleEvent::Ended { key, .. }
            | BattleEvent::Forfeited { key, .. }
            | BattleEvent::RewardsGranted { key, .. } => key,
        }
    }
}
