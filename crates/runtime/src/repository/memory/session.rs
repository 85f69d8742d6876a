//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::{BattleSession, SessionKey};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// In-memory implementation of SessionRepository.
pub struct InMemorySessionRepo {
    sessions: RwLock<HashMap<SessionKey, BattleSession>>,
}

impl InMemorySessionRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn save(&self, session: &BattleSession) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.insert(session.key.clone(), session.clone());
        Ok(())
    }

    fn load(&self, key: &SessionKey) -> Result<Option<BattleSession>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(key).cloned())
    }

    fn delete(&self, key: &SessionKey) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<SessionKey>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut keys: Vec<_> = sessions.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &SessionKey) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.contains_key(key))
    }
}
