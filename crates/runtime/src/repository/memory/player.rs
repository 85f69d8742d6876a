//! In-memory PlayerRepository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::PlayerId;

use crate::repository::{PlayerRecord, PlayerRepository, RepositoryError, Result};

/// In-memory player ledger.
///
/// Stands in for the external player store in tests, simulations and local
/// runs.
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Builder-style registration used when seeding a ledger.
    pub fn with_player(self, player: PlayerId, record: PlayerRecord) -> Self {
        if let Ok(mut players) = self.players.write() {
            players.insert(player, record);
        }
        self
    }
}

impl Default for InMemoryPlayerRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRepository for InMemoryPlayerRepo {
    fn load(&self, player: PlayerId) -> Result<Option<PlayerRecord>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(&player).cloned())
    }

    fn save(&self, player: PlayerId, record: &PlayerRecord) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(player, record.clone());
        Ok(())
    }

    // Edits in place under the write lock instead of load-then-save.
    fn update(&self, player: PlayerId, edit: &mut dyn FnMut(&mut PlayerRecord)) -> Result<bool> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match players.get_mut(&player) {
            Some(record) => {
                edit(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ActiveTask, TaskGoal};
    use battle_core::CombatStats;

    fn ledger() -> InMemoryPlayerRepo {
        InMemoryPlayerRepo::new()
            .with_player(PlayerId(1), PlayerRecord::new(CombatStats::new(100, 5, 5)))
            .with_player(
                PlayerId(2),
                PlayerRecord::new(CombatStats::new(100, 5, 5)).with_task(ActiveTask::new(
                    TaskGoal::DefeatEntity {
                        entity: "Mettaur".to_string(),
                    },
                    250,
                )),
            )
    }

    #[test]
    fn record_result_touches_both_players() {
        let repo = ledger();
        repo.record_result(PlayerId(1), PlayerId(2)).unwrap();
        assert_eq!(repo.load(PlayerId(1)).unwrap().unwrap().wins, 1);
        assert_eq!(repo.load(PlayerId(2)).unwrap().unwrap().losses, 1);
    }

    #[test]
    fn unknown_players_are_reported_not_created() {
        let repo = ledger();
        assert!(!repo.grant_currency(PlayerId(9), 10).unwrap());
        assert!(repo.load(PlayerId(9)).unwrap().is_none());
    }

    #[test]
    fn drops_land_in_the_right_bag() {
        let repo = ledger();
        repo.grant_item(PlayerId(1), "Cannon", true).unwrap();
        repo.grant_item(PlayerId(1), "Bug Frag", false).unwrap();
        let record = repo.load(PlayerId(1)).unwrap().unwrap();
        assert_eq!(record.chips.get("Cannon"), Some(&1));
        assert_eq!(record.items.get("Bug Frag"), Some(&1));
    }

    #[test]
    fn task_pays_out_once() {
        let repo = ledger();
        assert_eq!(repo.complete_task(PlayerId(2)).unwrap(), Some(250));
        assert_eq!(repo.complete_task(PlayerId(2)).unwrap(), None);
        let record = repo.load(PlayerId(2)).unwrap().unwrap();
        assert_eq!(record.currency, 250);
        assert!(record.task.unwrap().completed);
    }
}
