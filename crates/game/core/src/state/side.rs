use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;

use crate::action::QueuedAction;
use crate::ai::AiCounters;
use crate::config::BattleConfig;
use crate::effect::EffectDescriptor;
use crate::env::EntityTemplate;
use crate::error::SessionError;
use crate::status::StatusLedger;

use super::{PlayerId, SideId};

/// Stats a combatant brings into battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub max_hp: u32,
    pub dodge_pct: u8,
    pub crit_pct: u8,
}

impl CombatStats {
    pub fn new(max_hp: u32, dodge_pct: u8, crit_pct: u8) -> Self {
        Self {
            max_hp,
            dodge_pct,
            crit_pct,
        }
    }
}

/// Snapshot of an autonomous entity taken when the encounter starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub name: String,
    pub is_boss: bool,
    pub moves: ArrayVec<EffectDescriptor, { BattleConfig::MAX_ENTITY_MOVES }>,
    pub reward_range: (u32, u32),
    pub drop_list: Vec<String>,
}

impl EntitySnapshot {
    pub fn from_template(template: &EntityTemplate) -> Result<Self, SessionError> {
        if template.moves.is_empty() {
            return Err(SessionError::NoMoves {
                name: template.name.clone(),
            });
        }
        let moves = ArrayVec::try_from(template.moves.as_slice()).map_err(|_| {
            SessionError::TooManyMoves {
                name: template.name.clone(),
                count: template.moves.len(),
                max: BattleConfig::MAX_ENTITY_MOVES,
            }
        })?;

        Ok(Self {
            name: template.name.clone(),
            is_boss: template.is_boss,
            moves,
            reward_range: template.reward_range,
            drop_list: template.drop_list.clone(),
        })
    }

    pub fn find_move(&self, name: &str) -> Option<&EffectDescriptor> {
        self.moves
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

/// Who drives a side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combatant {
    /// Human-submitted actions. `stand_in` lists the chips an autopilot may
    /// play on the player's behalf (bot-vs-bot runs).
    Controlled {
        player: PlayerId,
        stand_in: Option<Vec<String>>,
    },
    /// AI-selected moves from the entity's own move list.
    Autonomous(EntitySnapshot),
}

impl Combatant {
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Combatant::Controlled { player, .. } => Some(*player),
            Combatant::Autonomous(_) => None,
        }
    }

    pub fn entity(&self) -> Option<&EntitySnapshot> {
        match self {
            Combatant::Controlled { .. } => None,
            Combatant::Autonomous(entity) => Some(entity),
        }
    }

    pub fn is_autonomous(&self) -> bool {
        matches!(self, Combatant::Autonomous(_))
    }

    /// Whether the AI selector picks this side's actions.
    pub fn is_autopiloted(&self) -> bool {
        match self {
            Combatant::Controlled { stand_in, .. } => stand_in.is_some(),
            Combatant::Autonomous(_) => true,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Combatant::Controlled { player, .. } => format!("player {player}"),
            Combatant::Autonomous(entity) => entity.name.clone(),
        }
    }
}

/// Per-side battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    pub combatant: Combatant,
    pub stats: CombatStats,
    pub hp: u32,
    /// Defense granted this round. Zero outside resolution.
    pub defense: u32,
    /// Times each action name was played this battle.
    pub usage: BTreeMap<String, u32>,
    /// One-time actions already spent this battle.
    pub specials_used: BTreeSet<String>,
    pub status: StatusLedger,
    pub queued: Option<QueuedAction>,
    /// Defensive-move budget for autopiloted sides.
    pub ai: AiCounters,
}

impl SideState {
    fn fresh(combatant: Combatant, stats: CombatStats) -> Self {
        Self {
            combatant,
            stats,
            hp: stats.max_hp,
            defense: 0,
            usage: BTreeMap::new(),
            specials_used: BTreeSet::new(),
            status: StatusLedger::default(),
            queued: None,
            ai: AiCounters::default(),
        }
    }

    pub fn controlled(player: PlayerId, stats: CombatStats) -> Self {
        Self::fresh(
            Combatant::Controlled {
                player,
                stand_in: None,
            },
            stats,
        )
    }

    /// A controlled side whose actions an autopilot picks from `chips`.
    pub fn stand_in(player: PlayerId, stats: CombatStats, chips: Vec<String>) -> Self {
        Self::fresh(
            Combatant::Controlled {
                player,
                stand_in: Some(chips),
            },
            stats,
        )
    }

    pub fn autonomous(template: &EntityTemplate) -> Result<Self, SessionError> {
        let snapshot = EntitySnapshot::from_template(template)?;
        let stats = CombatStats::new(template.max_hp, template.dodge_pct, template.crit_pct);
        Ok(Self::fresh(Combatant::Autonomous(snapshot), stats))
    }

    pub fn uses_of(&self, name: &str) -> u32 {
        self.usage.get(name).copied().unwrap_or(0)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Whether this side has nothing left to wait for this round.
    pub fn is_ready(&self) -> bool {
        self.queued.is_some() || self.status.stunned || self.combatant.is_autopiloted()
    }

    pub(crate) fn validate(&self, side: SideId, max_ticks: u8) -> Result<(), SessionError> {
        if self.stats.max_hp == 0 {
            return Err(SessionError::ZeroMaxHp { side });
        }
        if self.hp > self.stats.max_hp {
            return Err(SessionError::HpOutOfRange {
                side,
                hp: self.hp,
                max_hp: self.stats.max_hp,
            });
        }
        for (stat, value) in [
            ("dodge", self.stats.dodge_pct),
            ("crit", self.stats.crit_pct),
        ] {
            if value > 100 {
                return Err(SessionError::InvalidOdds { side, stat, value });
            }
        }
        for (slot, stack) in [("poison", self.status.poison), ("holy", self.status.holy)] {
            if let Some(stack) = stack
                && (stack.amount == 0 || stack.ticks_left == 0 || stack.ticks_left > max_ticks)
            {
                return Err(SessionError::InvalidStack {
                    side,
                    slot,
                    amount: stack.amount,
                    ticks_left: stack.ticks_left,
                });
            }
        }
        Ok(())
    }
}
