//! Repository contracts for saving and loading mutable runtime state.

use battle_core::{BattleConfig, BattleSession, PlayerId, SessionKey};

use super::error::Result;
use super::types::PlayerRecord;

/// Repository for active battle sessions.
///
/// One record per session key. A record exists exactly while its battle is
/// in progress; finished or forfeited battles are deleted.
pub trait SessionRepository: Send + Sync {
    /// Insert or replace the session stored under `session.key`.
    fn save(&self, session: &BattleSession) -> Result<()>;

    /// Load the session for a key, validated.
    fn load(&self, key: &SessionKey) -> Result<Option<BattleSession>>;

    /// Delete a session. Deleting an absent key is not an error.
    fn delete(&self, key: &SessionKey) -> Result<()>;

    /// Keys of every persisted session.
    fn list_keys(&self) -> Result<Vec<SessionKey>>;

    /// Check if a session exists
    fn exists(&self, key: &SessionKey) -> Result<bool> {
        Ok(self.load(key)?.is_some())
    }

    /// Receive the rules the runtime resolves with. Stores that validate on
    /// read check records against them.
    fn adopt_config(&self, _config: &BattleConfig) {}
}

/// Repository for player progression.
///
/// The player storage engine lives outside this crate; the runtime only needs
/// read access to stats and inventory plus a handful of atomic updates.
pub trait PlayerRepository: Send + Sync {
    fn load(&self, player: PlayerId) -> Result<Option<PlayerRecord>>;

    fn save(&self, player: PlayerId, record: &PlayerRecord) -> Result<()>;

    /// Apply `edit` to a stored record. Returns `false` when the player is unknown.
    fn update(&self, player: PlayerId, edit: &mut dyn FnMut(&mut PlayerRecord)) -> Result<bool> {
        match self.load(player)? {
            Some(mut record) => {
                edit(&mut record);
                self.save(player, &record)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record a decided duel.
    fn record_result(&self, winner: PlayerId, loser: PlayerId) -> Result<()> {
        self.update(winner, &mut |record| record.wins += 1)?;
        self.update(loser, &mut |record| record.losses += 1)?;
        Ok(())
    }

    fn grant_currency(&self, player: PlayerId, amount: u64) -> Result<bool> {
        self.update(player, &mut |record| {
            record.currency = record.currency.saturating_add(amount)
        })
    }

    /// Grant one copy of a drop. Chips the player can play go to the chip
    /// inventory; anything else to the item bag.
    fn grant_item(&self, player: PlayerId, item: &str, is_chip: bool) -> Result<bool> {
        self.update(player, &mut |record| {
            let bag = if is_chip {
                &mut record.chips
            } else {
                &mut record.items
            };
            *bag.entry(item.to_string()).or_default() += 1;
        })
    }

    /// Mark the active task complete and pay its reward. Returns the reward
    /// paid, or `None` when there was nothing to complete.
    fn complete_task(&self, player: PlayerId) -> Result<Option<u64>> {
        let mut paid = None;
        self.update(player, &mut |record| {
            if let Some(task) = record.task.as_mut()
                && !task.completed
            {
                task.completed = true;
                record.currency = record.currency.saturating_add(task.reward);
                paid = Some(task.reward);
            }
        })?;
        Ok(paid)
    }
}
