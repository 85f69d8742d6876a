//! Persisted record types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use battle_core::{BattleConfig, BattleSession, CombatStats};

use super::error::{RepositoryError, Result};

/// Current on-disk layout of [`SessionRecord`].
pub const SESSION_RECORD_VERSION: u32 = 1;

/// Versioned envelope around a persisted battle session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub version: u32,
    pub session: BattleSession,
}

impl SessionRecord {
    pub fn new(session: BattleSession) -> Self {
        Self {
            version: SESSION_RECORD_VERSION,
            session,
        }
    }

    /// Unwraps the session after checking the version and every session invariant.
    pub fn into_session(self, config: &BattleConfig) -> Result<BattleSession> {
        if self.version != SESSION_RECORD_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.version,
                expected: SESSION_RECORD_VERSION,
            });
        }
        self.session
            .validate(config)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", self.session.key, e)))?;
        Ok(self.session)
    }
}

/// Persistent progression of a controlled player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub stats: CombatStats,
    /// Owned copies per chip name.
    pub chips: BTreeMap<String, u32>,
    pub wins: u32,
    pub losses: u32,
    pub currency: u64,
    /// Granted drops that are not chips.
    pub items: BTreeMap<String, u32>,
    pub task: Option<ActiveTask>,
}

impl PlayerRecord {
    pub fn new(stats: CombatStats) -> Self {
        Self {
            stats,
            chips: BTreeMap::new(),
            wins: 0,
            losses: 0,
            currency: 0,
            items: BTreeMap::new(),
            task: None,
        }
    }

    pub fn with_chip(mut self, name: impl Into<String>, count: u32) -> Self {
        *self.chips.entry(name.into()).or_default() += count;
        self
    }

    pub fn with_task(mut self, task: ActiveTask) -> Self {
        self.task = Some(task);
        self
    }
}

/// A task a player is working on, completed by battle results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTask {
    pub goal: TaskGoal,
    pub reward: u64,
    pub completed: bool,
}

impl ActiveTask {
    pub fn new(goal: TaskGoal, reward: u64) -> Self {
        Self {
            goal,
            reward,
            completed: false,
        }
    }
}

/// Condition that completes an [`ActiveTask`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskGoal {
    /// Win an encounter against the named entity.
    DefeatEntity { entity: String },
    /// Play the named chip during a won encounter.
    PlayChip { chip: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{PlayerId, SessionKey, SideId, SideState};

    fn session() -> BattleSession {
        BattleSession::duel(
            SessionKey::new("arena"),
            SideState::controlled(PlayerId(1), CombatStats::new(100, 10, 10)),
            SideState::controlled(PlayerId(2), CombatStats::new(100, 10, 10)),
            0,
            60_000,
        )
        .unwrap()
    }

    #[test]
    fn record_round_trips_through_validation() {
        let record = SessionRecord::new(session());
        let restored = record.into_session(&BattleConfig::default()).unwrap();
        assert_eq!(restored, session());
    }

    #[test]
    fn future_versions_are_refused() {
        let mut record = SessionRecord::new(session());
        record.version = 9;
        assert!(matches!(
            record.into_session(&BattleConfig::default()),
            Err(RepositoryError::UnsupportedVersion {
                found: 9,
                expected: 1
            })
        ));
    }

    #[test]
    fn hp_above_max_is_corrupted() {
        let mut record = SessionRecord::new(session());
        record.session.side_mut(SideId::Opponent).hp = 150;
        assert!(matches!(
            record.into_session(&BattleConfig::default()),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
