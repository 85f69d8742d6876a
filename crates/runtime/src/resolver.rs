//! Battle coordinator.
//!
//! Owns the side effects around the pure rules: it loads a session under its
//! key lock, runs validation or the [`RoundResolver`], persists or deletes the
//! result, re-arms the round timer, settles records and rewards, and publishes
//! events. Nothing outside this module mutates a session.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use battle_core::{
    BattleConfig, BattleKind, BattleOutcome, BattleSession, CatalogOracle, EntitySnapshot, PcgRng,
    PlayerId, RandomSource, Rejection, RoundReport, RoundResolution, RoundResolver, SessionKey,
    SideId, SideState, Submission, validate_submission,
};

use crate::api::{Participant, Result, RuntimeError, Submitted};
use crate::events::{BattleEvent, Event, EventBus, RoundEvent};
use crate::repository::{PlayerRepository, SessionRepository};
use crate::rewards::grant_encounter_rewards;
use crate::workers::{RoundTimers, SessionLocks, now_ms};

pub struct BattleCoordinator {
    config: BattleConfig,
    catalog: Arc<dyn CatalogOracle>,
    sessions: Arc<dyn SessionRepository>,
    players: Arc<dyn PlayerRepository>,
    events: EventBus,
    locks: SessionLocks,
    timers: RoundTimers,
}

impl BattleCoordinator {
    pub fn new(
        config: BattleConfig,
        catalog: Arc<dyn CatalogOracle>,
        sessions: Arc<dyn SessionRepository>,
        players: Arc<dyn PlayerRepository>,
        events: EventBus,
        timers: RoundTimers,
    ) -> Self {
        Self {
            config,
            catalog,
            sessions,
            players,
            events,
            locks: SessionLocks::new(),
            timers,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn pending_timer(&self, key: &SessionKey) -> Option<(u32, u64)> {
        self.timers.pending(key)
    }

    // ===== lifecycle =====

    pub async fn start_duel(
        &self,
        key: SessionKey,
        challenger: Participant,
        opponent: Participant,
    ) -> Result<BattleSession> {
        let _guard = self.locks.acquire(&key).await;
        if self.sessions.exists(&key)? {
            return Err(RuntimeError::SessionExists(key));
        }

        let now = now_ms();
        let session = BattleSession::duel(
            key,
            self.side_for(&challenger)?,
            self.side_for(&opponent)?,
            now,
            self.config.deadline_after(now),
        )?;
        self.open(&session)?;
        Ok(session)
    }

    pub async fn start_encounter(
        &self,
        key: SessionKey,
        challenger: Participant,
        entity: &str,
    ) -> Result<BattleSession> {
        let _guard = self.locks.acquire(&key).await;
        if self.sessions.exists(&key)? {
            return Err(RuntimeError::SessionExists(key));
        }

        let template = self
            .catalog
            .entity(entity)
            .ok_or_else(|| RuntimeError::UnknownEntity(entity.to_string()))?;
        let now = now_ms();
        let session = BattleSession::encounter(
            key,
            self.side_for(&challenger)?,
            template,
            now,
            self.config.deadline_after(now),
        )?;
        self.open(&session)?;
        Ok(session)
    }

    fn side_for(&self, participant: &Participant) -> Result<SideState> {
        let record = self
            .players
            .load(participant.player)?
            .ok_or(RuntimeError::UnknownPlayer(participant.player))?;
        Ok(match &participant.stand_in {
            Some(chips) => SideState::stand_in(participant.player, record.stats, chips.clone()),
            None => SideState::controlled(participant.player, record.stats),
        })
    }

    fn open(&self, session: &BattleSession) -> Result<()> {
        self.sessions.save(session)?;
        self.timers.schedule(
            session.key.clone(),
            session.round,
            session.round_deadline_ms,
        );

        info!(
            target: "runtime::resolver",
            key = %session.key,
            kind = ?session.kind,
            challenger = %session.side(SideId::Challenger).combatant.label(),
            opponent = %session.side(SideId::Opponent).combatant.label(),
            "battle started"
        );
        self.events.publish(Event::Battle(BattleEvent::Started {
            key: session.key.clone(),
            kind: session.kind,
            challenger: session.side(SideId::Challenger).combatant.label(),
            opponent: session.side(SideId::Opponent).combatant.label(),
            deadline_ms: session.round_deadline_ms,
        }));
        Ok(())
    }

    // ===== submissions =====

    /// Validate and queue an action. Resolves the round at once when the
    /// submission leaves every side ready.
    pub async fn submit_action(
        &self,
        key: &SessionKey,
        actor: PlayerId,
        submission: Submission,
    ) -> Result<Submitted> {
        let _guard = self.locks.acquire(key).await;
        let mut session = self.load_active(key)?;

        let inventory = self
            .players
            .load(actor)?
            .map(|record| record.chips)
            .unwrap_or_default();
        let (side, queued) = validate_submission(
            &session,
            actor,
            &submission,
            &*self.catalog,
            &inventory,
            &self.config,
        )
        .inspect_err(|reason| {
            debug!(
                target: "runtime::resolver",
                key = %key,
                actor = %actor,
                chip = %submission.chip,
                reason = %reason,
                "submission rejected"
            );
        })?;

        debug!(
            target: "runtime::resolver",
            key = %key,
            round = session.round,
            side = side.as_str(),
            action = ?queued,
            "action queued"
        );
        session.side_mut(side).queued = Some(queued);

        if session.all_ready() {
            let resolution = self.resolve_locked(&session)?;
            return Ok(Submitted::Resolved(resolution));
        }

        self.sessions.save(&session)?;
        Ok(Submitted::Queued {
            round: session.round,
        })
    }

    /// End a battle on behalf of one participant.
    pub async fn forfeit(&self, key: &SessionKey, actor: PlayerId) -> Result<()> {
        let _guard = self.locks.acquire(key).await;
        let session = self.load_active(key)?;
        let side = session.side_of(actor).ok_or(Rejection::NotParticipant)?;

        self.sessions.delete(key)?;
        self.timers.cancel(key);

        if session.kind == BattleKind::Duel
            && let Some(winner) = session.side(side.opponent()).combatant.player()
            && let Err(e) = self.players.record_result(winner, actor)
        {
            error!(
                target: "runtime::resolver",
                key = %key,
                error = %e,
                "failed to record forfeited duel"
            );
        }

        info!(
            target: "runtime::resolver",
            key = %key,
            round = session.round,
            side = side.as_str(),
            "battle forfeited"
        );
        self.events.publish(Event::Battle(BattleEvent::Forfeited {
            key: key.clone(),
            by: actor,
            side,
        }));
        Ok(())
    }

    pub fn query_state(&self, key: &SessionKey) -> Result<Option<BattleSession>> {
        Ok(self.sessions.load(key)?)
    }

    /// Re-arm the timer of every persisted session. Returns how many were armed.
    pub async fn recover(&self) -> Result<usize> {
        let mut armed = 0;
        for key in self.sessions.list_keys()? {
            let _guard = self.locks.acquire(&key).await;
            match self.sessions.load(&key) {
                Ok(Some(session)) => {
                    self.timers
                        .schedule(key, session.round, session.round_deadline_ms);
                    armed += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        target: "runtime::resolver",
                        key = %key,
                        error = %e,
                        "skipping unreadable session during recovery"
                    );
                }
            }
        }
        info!(target: "runtime::resolver", armed, "recovered round timers");
        Ok(armed)
    }

    // ===== resolution =====

    /// Round deadline reached for `(key, round)`.
    pub async fn on_round_timer(&self, key: SessionKey, round: u32) {
        let _guard = self.locks.acquire(&key).await;

        let session = match self.sessions.load(&key) {
            Ok(Some(session)) if session.round == round => session,
            Ok(Some(session)) => {
                debug!(
                    target: "runtime::resolver",
                    key = %key,
                    round,
                    current = session.round,
                    "stale round timer"
                );
                return;
            }
            Ok(None) => {
                debug!(target: "runtime::resolver", key = %key, round, "round timer for ended battle");
                return;
            }
            Err(e) => {
                error!(target: "runtime::resolver", key = %key, round, error = %e, "failed to load session for round timer");
                return;
            }
        };

        if let Err(e) = self.resolve_locked(&session) {
            error!(
                target: "runtime::resolver",
                key = %key,
                round,
                error = %e,
                "round resolution failed; retrying after another timeout"
            );
            self.timers
                .schedule(key, round, self.config.deadline_after(now_ms()));
        }
    }

    /// Resolve `session`'s current round. The caller holds the key lock.
    fn resolve_locked(&self, session: &BattleSession) -> Result<RoundResolution> {
        let mut rng = PcgRng::seeded(rand::random());
        let resolver = RoundResolver::new(&*self.catalog, &self.config);
        let resolution = resolver.resolve(session, now_ms(), &mut rng);

        match &resolution {
            RoundResolution::Extended { session } => {
                self.sessions.save(session)?;
                self.rearm(session);
                info!(
                    target: "runtime::resolver",
                    key = %session.key,
                    round = session.round,
                    "no actions submitted; round extended"
                );
                self.events.publish(Event::Round(RoundEvent::Extended {
                    key: session.key.clone(),
                    round: session.round,
                    deadline_ms: session.round_deadline_ms,
                }));
            }
            RoundResolution::Continued { session, report } => {
                self.sessions.save(session)?;
                self.rearm(session);
                log_report(&session.key, report);
                self.events.publish(Event::Round(RoundEvent::Resolved {
                    key: session.key.clone(),
                    report: report.clone(),
                    next_deadline_ms: session.round_deadline_ms,
                }));
            }
            RoundResolution::Finished {
                session,
                report,
                outcome,
            } => {
                self.sessions.delete(&session.key)?;
                self.timers.cancel(&session.key);
                log_report(&session.key, report);
                info!(
                    target: "runtime::resolver",
                    key = %session.key,
                    round = session.round,
                    outcome = ?outcome,
                    "battle ended"
                );
                self.settle(session, *outcome, &mut rng);
                self.events.publish(Event::Battle(BattleEvent::Ended {
                    key: session.key.clone(),
                    outcome: *outcome,
                    report: report.clone(),
                }));
            }
        }
        Ok(resolution)
    }

    fn rearm(&self, session: &BattleSession) {
        self.timers.schedule(
            session.key.clone(),
            session.round,
            session.round_deadline_ms,
        );
    }

    /// Records for decided duels, rewards for won encounters. Failures are
    /// logged; the battle is already over.
    fn settle(&self, session: &BattleSession, outcome: BattleOutcome, rng: &mut impl RandomSource) {
        let (Some(winner), Some(loser)) = (outcome.winner(), outcome.loser()) else {
            return;
        };

        let result = match session.kind {
            BattleKind::Duel => match (
                session.side(winner).combatant.player(),
                session.side(loser).combatant.player(),
            ) {
                (Some(winner), Some(loser)) => self.players.record_result(winner, loser),
                _ => Ok(()),
            },
            BattleKind::Encounter => {
                let challenger = session.side(SideId::Challenger);
                let player = challenger.combatant.player();
                let entity = session.side(SideId::Opponent).combatant.entity();
                match (winner, player, entity) {
                    (SideId::Challenger, Some(player), Some(entity)) => {
                        self.reward(session, player, entity, &challenger.usage, rng)
                    }
                    _ => Ok(()),
                }
            }
        };

        if let Err(e) = result {
            error!(
                target: "runtime::resolver",
                key = %session.key,
                error = %e,
                "failed to settle battle results"
            );
        }
    }

    fn reward(
        &self,
        session: &BattleSession,
        player: PlayerId,
        entity: &EntitySnapshot,
        played: &BTreeMap<String, u32>,
        rng: &mut impl RandomSource,
    ) -> crate::repository::Result<()> {
        let grant = grant_encounter_rewards(
            &*self.players,
            &*self.catalog,
            &self.config,
            player,
            entity,
            played,
            rng,
        )?;
        self.events.publish(Event::Battle(BattleEvent::RewardsGranted {
            key: session.key.clone(),
            player,
            grant,
        }));
        Ok(())
    }

    fn load_active(&self, key: &SessionKey) -> Result<BattleSession> {
        self.sessions
            .load(key)?
            .ok_or(RuntimeError::Rejected(Rejection::NoSession))
    }
}

fn log_report(key: &SessionKey, report: &RoundReport) {
    for id in SideId::BOTH {
        let side = report.side(id);
        debug!(
            target: "runtime::resolver",
            key = %key,
            round = report.round,
            side = id.as_str(),
            actions = ?side.actions,
            stunned = side.stunned,
            damage = side.damage_dealt,
            poison_tick = side.ticks.poison_damage,
            holy_tick = side.ticks.holy_heal,
            hp = side.hp,
            "side summary"
        );
    }
    info!(
        target: "runtime::resolver",
        key = %key,
        round = report.round,
        challenger_hp = report.side(SideId::Challenger).hp,
        opponent_hp = report.side(SideId::Opponent).hp,
        "round resolved"
    );
}
