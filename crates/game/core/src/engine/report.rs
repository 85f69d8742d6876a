use crate::combat::AttackOutcome;
use crate::error::Rejection;
use crate::state::{BattleSession, SideId};
use crate::status::TickOutcome;

/// How a finished battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory { winner: SideId },
    Draw,
}

impl BattleOutcome {
    pub fn winner(&self) -> Option<SideId> {
        match self {
            BattleOutcome::Victory { winner } => Some(*winner),
            BattleOutcome::Draw => None,
        }
    }

    pub fn loser(&self) -> Option<SideId> {
        self.winner().map(SideId::opponent)
    }
}

/// What happened to one side during a resolved round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideReport {
    /// Display label of the combatant.
    pub label: String,
    /// Names consumed this round, in play order.
    pub actions: Vec<String>,
    pub stunned: bool,
    /// Set when the queued action no longer interprets (catalog drift).
    pub rejected: Option<Rejection>,
    /// Outcome of this side's own attack, if it attacked.
    pub attack: Option<AttackOutcome>,
    /// Instant damage dealt to the opponent after poison conversion.
    pub damage_dealt: u32,
    /// Per-tick amount of a poison stack this side placed on the opponent.
    pub poison_inflicted: Option<u32>,
    pub paralyzed_opponent: bool,
    pub defense: u32,
    pub barrier: bool,
    /// Instant recovery actually applied.
    pub recovered: u32,
    pub holy_applied: Option<u32>,
    pub repaired: bool,
    pub ticks: TickOutcome,
    pub hp: u32,
    pub max_hp: u32,
}

/// Summary of one resolved round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub round: u32,
    /// Indexed by [`SideId::index`].
    pub sides: [SideReport; 2],
}

impl RoundReport {
    pub fn side(&self, id: SideId) -> &SideReport {
        &self.sides[id.index()]
    }

    pub(crate) fn side_mut(&mut self, id: SideId) -> &mut SideReport {
        &mut self.sides[id.index()]
    }
}

/// Result of running the resolver against a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundResolution {
    /// Nobody acted; only the deadline moved.
    Extended { session: BattleSession },
    /// The round resolved and the battle goes on.
    Continued {
        session: BattleSession,
        report: RoundReport,
    },
    /// The round resolved and ended the battle. `session` holds the final
    /// state for reporting; it must not be persisted.
    Finished {
        session: BattleSession,
        report: RoundReport,
        outcome: BattleOutcome,
    },
}

impl RoundResolution {
    pub fn session(&self) -> &BattleSession {
        match self {
            RoundResolution::Extended { session }
            | RoundResolution::Continued { session, .. }
            | RoundResolution::Finished { session, .. } => session,
        }
    }

    pub fn report(&self) -> Option<&RoundReport> {
        match self {
            RoundResolution::Extended { .. } => None,
            RoundResolution::Continued { report, .. }
            | RoundResolution::Finished { report, .. } => Some(report),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, RoundResolution::Finished { .. })
    }
}
