//! High-level runtime orchestrator.
//!
//! The runtime owns the timer worker, wires the coordinator to its
//! repositories, catalog and event bus, and exposes a builder-based API for
//! clients to drive battles.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use battle_core::{BattleConfig, CatalogOracle};

use crate::api::{BattleHandle, Result, RuntimeError};
use crate::events::EventBus;
use crate::repository::{
    InMemoryPlayerRepo, InMemorySessionRepo, PlayerRepository, SessionRepository,
};
use crate::resolver::BattleCoordinator;
use crate::workers::{RoundTimers, TimerFired, TimerWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    /// Capacity of the channel between round timers and the timer worker.
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `ROUND_TIMEOUT_SECS`, `USAGE_CAP` and
    /// `EVENT_BUFFER_SIZE` when set.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply the environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(secs) = env_var("ROUND_TIMEOUT_SECS")? {
            self.battle.round_timeout_secs = secs;
        }
        if let Some(cap) = env_var("USAGE_CAP")? {
            self.battle.usage_cap = cap;
        }
        if let Some(size) = env_var("EVENT_BUFFER_SIZE")? {
            self.event_buffer_size = size;
        }
        Ok(self)
    }

    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }
}

fn env_var<T: FromStr>(var: &'static str) -> Result<Option<T>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidConfig { var, value }),
        Err(_) => Ok(None),
    }
}

/// Main runtime that orchestrates battles
///
/// Design: Runtime owns the background timer worker.
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: BattleHandle,
    timer_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Pending round timers are dropped once every handle clone is gone; the
    /// timer worker then exits and is joined here.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.timer_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<dyn CatalogOracle>>,
    sessions: Option<Arc<dyn SessionRepository>>,
    players: Option<Arc<dyn PlayerRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            sessions: None,
            players: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required chip and entity catalog
    pub fn catalog(mut self, catalog: Arc<dyn CatalogOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Session store (defaults to in-memory)
    pub fn sessions(mut self, sessions: Arc<dyn SessionRepository>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Player ledger (defaults to an empty in-memory ledger)
    pub fn players(mut self, players: Arc<dyn PlayerRepository>) -> Self {
        self.players = Some(players);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let sessions: Arc<dyn SessionRepository> = match self.sessions {
            Some(sessions) => sessions,
            None => Arc::new(InMemorySessionRepo::new()),
        };
        sessions.adopt_config(&self.config.battle);
        let players: Arc<dyn PlayerRepository> = match self.players {
            Some(players) => players,
            None => Arc::new(InMemoryPlayerRepo::new()),
        };

        let (fired_tx, fired_rx) =
            mpsc::channel::<TimerFired>(self.config.command_buffer_size.max(1));
        let events = EventBus::with_capacity(self.config.event_buffer_size);

        let coordinator = Arc::new(BattleCoordinator::new(
            self.config.battle,
            catalog,
            sessions,
            players,
            events,
            RoundTimers::new(fired_tx),
        ));

        let timer_worker = TimerWorker::new(Arc::downgrade(&coordinator), fired_rx);
        let timer_worker_handle = tokio::spawn(async move {
            timer_worker.run().await;
        });

        tracing::info!(
            target: "runtime::resolver",
            round_timeout_secs = coordinator.config().round_timeout_secs,
            usage_cap = coordinator.config().usage_cap,
            "runtime started"
        );

        Ok(Runtime {
            handle: BattleHandle::new(coordinator),
            timer_worker_handle,
        })
    }
}
