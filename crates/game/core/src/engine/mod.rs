//! Round resolution.
//!
//! [`RoundResolver`] is the only place a session advances. It takes the
//! persisted snapshot, resolves both sides' actions against each other in one
//! pass and hands back either the next snapshot or the final one, plus a
//! [`RoundReport`]. The input is never touched, so a caller that fails to
//! persist the result has nothing to roll back.
//!
//! # Order of a resolution
//!
//! ```text
//! autopilot fill -> idle check -> interpret (stun = no-op)
//!   -> attacks (challenger first) -> barrier recovery suppression
//!   -> repair, then new poison / holy stacks -> paralyze
//!   -> instant hp deltas -> one status tick -> usage + specials -> outcome
//! ```

mod report;

pub use report::{BattleOutcome, RoundReport, RoundResolution, SideReport};

use crate::action::{ActionSource, Intent, QueuedAction, interpret};
use crate::ai::choose_move;
use crate::combat::{AttackInput, AttackOutcome, apply_hp_delta, resolve_attack};
use crate::config::BattleConfig;
use crate::effect::{EffectDescriptor, EffectKind};
use crate::env::{CatalogOracle, RandomSource};
use crate::state::{BattleSession, Combatant, SideId, SideState};

/// Resolves rounds against a catalog and a rule set.
#[derive(Clone, Copy)]
pub struct RoundResolver<'a> {
    catalog: &'a dyn CatalogOracle,
    config: &'a BattleConfig,
}

impl<'a> RoundResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, config: &'a BattleConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve the current round of `session` at `now_ms`.
    ///
    /// Autopiloted sides without an action get one first. When afterwards no
    /// side has an action and no side is stunned, only the deadline moves.
    pub fn resolve(
        &self,
        session: &BattleSession,
        now_ms: u64,
        rng: &mut impl RandomSource,
    ) -> RoundResolution {
        let mut next = session.clone();
        self.fill_autopilot(&mut next, rng);

        let idle = next
            .sides
            .iter()
            .all(|side| side.queued.is_none() && !side.status.stunned);
        if idle {
            next.round_deadline_ms = self.config.deadline_after(now_ms);
            return RoundResolution::Extended { session: next };
        }

        let mut report = RoundReport {
            round: next.round,
            ..RoundReport::default()
        };
        let intents = self.interpret_sides(&mut next, &mut report);
        let attacks = self.exchange_attacks(&next, &intents, rng);
        self.apply_round(&mut next, &intents, &attacks, &mut report);

        let outcome = match (
            next.side(SideId::Challenger).is_defeated(),
            next.side(SideId::Opponent).is_defeated(),
        ) {
            (true, true) => Some(BattleOutcome::Draw),
            (true, false) => Some(BattleOutcome::Victory {
                winner: SideId::Opponent,
            }),
            (false, true) => Some(BattleOutcome::Victory {
                winner: SideId::Challenger,
            }),
            (false, false) => None,
        };

        match outcome {
            Some(outcome) => RoundResolution::Finished {
                session: next,
                report,
                outcome,
            },
            None => {
                for side in next.sides.iter_mut() {
                    side.defense = 0;
                    side.queued = None;
                }
                next.round += 1;
                next.round_deadline_ms = self.config.deadline_after(now_ms);
                RoundResolution::Continued {
                    session: next,
                    report,
                }
            }
        }
    }

    fn fill_autopilot(&self, session: &mut BattleSession, rng: &mut impl RandomSource) {
        for side in session.sides.iter_mut() {
            if side.queued.is_none() && !side.status.stunned {
                side.queued = self.autopilot_pick(side, rng);
            }
        }
    }

    fn autopilot_pick(
        &self,
        side: &mut SideState,
        rng: &mut impl RandomSource,
    ) -> Option<QueuedAction> {
        match &side.combatant {
            Combatant::Autonomous(entity) => {
                let chosen = choose_move(
                    &entity.moves,
                    &side.specials_used,
                    &mut side.ai,
                    self.config,
                    rng,
                )?;
                Some(QueuedAction::Move {
                    name: chosen.name.clone(),
                })
            }
            Combatant::Controlled {
                stand_in: Some(chips),
                ..
            } => {
                let usable: Vec<EffectDescriptor> = chips
                    .iter()
                    .filter_map(|name| self.catalog.chip(name))
                    .filter(|chip| side.uses_of(&chip.name) < self.config.usage_cap)
                    .cloned()
                    .collect();
                let chosen =
                    choose_move(&usable, &side.specials_used, &mut side.ai, self.config, rng)?;
                Some(QueuedAction::Chip {
                    name: chosen.name.clone(),
                })
            }
            Combatant::Controlled { stand_in: None, .. } => None,
        }
    }

    fn interpret_sides(
        &self,
        session: &mut BattleSession,
        report: &mut RoundReport,
    ) -> [Intent; 2] {
        let mut intents: [Intent; 2] = Default::default();
        for id in SideId::BOTH {
            let side = session.side_mut(id);
            let entry = report.side_mut(id);
            let stunned = side.status.take_stun();
            let moves = side
                .combatant
                .entity()
                .map(|entity| entity.moves.as_slice())
                .unwrap_or_default();
            let source = ActionSource::new(self.catalog, moves);

            let intent = match interpret(side.queued.as_ref(), stunned, &source) {
                Ok(intent) => intent,
                Err(rejection) => {
                    entry.rejected = Some(rejection);
                    Intent::default()
                }
            };

            side.defense = intent.defense;
            entry.label = side.combatant.label();
            entry.stunned = stunned;
            entry.actions = intent.consumed.iter().map(|c| c.name.clone()).collect();
            entry.defense = intent.defense;
            entry.barrier = intent.barrier;
            intents[id.index()] = intent;
        }
        intents
    }

    fn exchange_attacks(
        &self,
        session: &BattleSession,
        intents: &[Intent; 2],
        rng: &mut impl RandomSource,
    ) -> [Option<AttackOutcome>; 2] {
        let mut outcomes = [None, None];
        for attacker in SideId::BOTH {
            let defender = attacker.opponent();
            let intent = &intents[attacker.index()];
            let Some(effect) = intent.attack.as_ref() else {
                continue;
            };
            let guard = &intents[defender.index()];
            let input = AttackInput {
                effect,
                support_bonus: intent.support_bonus,
                defender_defense: guard.defense,
                defender_barrier: guard.barrier,
                defender_dodge_pct: session.side(defender).stats.dodge_pct,
                attacker_crit_pct: session.side(attacker).stats.crit_pct,
            };
            outcomes[attacker.index()] = Some(resolve_attack(&input, self.config, rng));
        }
        outcomes
    }

    fn apply_round(
        &self,
        session: &mut BattleSession,
        intents: &[Intent; 2],
        attacks: &[Option<AttackOutcome>; 2],
        report: &mut RoundReport,
    ) {
        let ticks = self.config.status_ticks;
        // indexed by the receiving side
        let mut incoming = [0u32; 2];
        let mut new_poison: [Option<u32>; 2] = [None, None];

        for attacker in SideId::BOTH {
            let defender = attacker.opponent();
            let (Some(outcome), Some(effect)) =
                (attacks[attacker.index()], intents[attacker.index()].attack.as_ref())
            else {
                continue;
            };
            let entry = report.side_mut(attacker);
            entry.attack = Some(outcome);
            if !outcome.landed() {
                continue;
            }

            if effect.has(EffectKind::Poison) {
                let amount = outcome.unmitigated;
                new_poison[defender.index()] = Some(amount);
                entry.poison_inflicted = Some(amount);
            } else {
                incoming[defender.index()] = outcome.damage;
                entry.damage_dealt = outcome.damage;
            }

            if effect.has(EffectKind::Paralyze) {
                session.side_mut(defender).status.stunned = true;
                entry.paralyzed_opponent = true;
            }
        }

        for id in SideId::BOTH {
            let intent = &intents[id.index()];
            let own_attack_cancelled =
                attacks[id.index()].is_some_and(|outcome| outcome.cancelled_by_barrier);
            let recovery = if own_attack_cancelled { 0 } else { intent.recovery };

            let side = session.side_mut(id);
            if intent.repair {
                side.status.repair();
            }
            if let Some(amount) = new_poison[id.index()] {
                side.status.apply_poison(amount, ticks);
            }
            if let Some(amount) = intent.holy {
                side.status.apply_holy(amount, ticks);
            }

            let max_hp = side.stats.max_hp;
            side.hp = apply_hp_delta(side.hp, max_hp, incoming[id.index()], recovery);
            let tick = side.status.tick();
            side.hp = apply_hp_delta(side.hp, max_hp, tick.poison_damage, tick.holy_heal);

            for consumed in &intent.consumed {
                *side.usage.entry(consumed.name.clone()).or_default() += 1;
                if consumed.special {
                    side.specials_used.insert(consumed.name.clone());
                }
            }

            let entry = report.side_mut(id);
            entry.recovered = recovery;
            entry.holy_applied = intent.holy.filter(|amount| *amount > 0);
            entry.repaired = intent.repair;
            entry.ticks = tick;
            entry.hp = side.hp;
            entry.max_hp = max_hp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EntityTemplate, ScriptedRng};
    use crate::error::Rejection;
    use crate::state::{CombatStats, PlayerId, SessionKey};
    use crate::status::StatusStack;
    use crate::testing::TestCatalog;

    const NOW: u64 = 1_000;

    fn catalog() -> TestCatalog {
        TestCatalog::default()
            .with_chip(EffectDescriptor::new("Cannon", [EffectKind::Attack]).with_power(40))
            .with_chip(EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(20))
            .with_chip(
                EffectDescriptor::new("Venom", [EffectKind::Attack, EffectKind::Poison])
                    .with_power(20),
            )
            .with_chip(EffectDescriptor::new("Guard", [EffectKind::Defense]).with_defense(5))
            .with_chip(EffectDescriptor::new("Barrier", [EffectKind::Barrier]))
            .with_chip(
                EffectDescriptor::new("Drain", [EffectKind::Attack, EffectKind::Recovery])
                    .with_power(20)
                    .with_heal(10),
            )
            .with_chip(
                EffectDescriptor::new("Stun Rod", [EffectKind::Attack, EffectKind::Paralyze])
                    .with_power(10),
            )
            .with_chip(
                EffectDescriptor::new("Cleanse", [EffectKind::Repair, EffectKind::Holy])
                    .with_heal(5),
            )
            .with_chip(EffectDescriptor::new("Atk+10", [EffectKind::Support]).with_bonus(10))
            .with_chip(EffectDescriptor::new("Sap", [EffectKind::Support]).with_bonus(-18))
            .with_chip(
                EffectDescriptor::new("Giga Cannon", [EffectKind::Attack])
                    .with_power(60)
                    .with_special(),
            )
    }

    fn duel() -> BattleSession {
        BattleSession::duel(
            SessionKey::new("arena"),
            SideState::controlled(PlayerId(1), CombatStats::new(100, 0, 0)),
            SideState::controlled(PlayerId(2), CombatStats::new(100, 0, 0)),
            0,
            NOW,
        )
        .unwrap()
    }

    fn queue(session: &mut BattleSession, side: SideId, chip: &str) {
        session.side_mut(side).queued = Some(QueuedAction::Chip {
            name: chip.to_string(),
        });
    }

    fn resolve(session: &BattleSession) -> RoundResolution {
        let catalog = catalog();
        let config = BattleConfig::default();
        RoundResolver::new(&catalog, &config).resolve(session, NOW, &mut ScriptedRng::never())
    }

    fn continued(resolution: RoundResolution) -> (BattleSession, RoundReport) {
        match resolution {
            RoundResolution::Continued { session, report } => (session, report),
            other => panic!("expected a continued battle, got {other:?}"),
        }
    }

    #[test]
    fn idle_round_only_moves_the_deadline() {
        let session = duel();
        let resolution = resolve(&session);

        let RoundResolution::Extended { session: next } = resolution else {
            panic!("expected an extension");
        };
        assert_eq!(next.round, 1);
        assert_eq!(next.round_deadline_ms, NOW + 60_000);
        assert_eq!(next.sides, session.sides);
    }

    #[test]
    fn one_sided_round_still_resolves() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Sword");

        let (next, report) = continued(resolve(&session));
        assert_eq!(next.side(SideId::Opponent).hp, 80);
        assert_eq!(report.side(SideId::Challenger).damage_dealt, 20);
        assert!(report.side(SideId::Opponent).actions.is_empty());
    }

    #[test]
    fn continued_round_resets_transient_state() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Guard");
        queue(&mut session, SideId::Opponent, "Sword");

        let (next, report) = continued(resolve(&session));
        assert_eq!(report.side(SideId::Challenger).defense, 5);
        assert_eq!(next.side(SideId::Challenger).hp, 85);
        assert_eq!(next.round, 2);
        assert_eq!(next.round_deadline_ms, NOW + 60_000);
        for side in &next.sides {
            assert_eq!(side.defense, 0);
            assert!(side.queued.is_none());
        }
    }

    #[test]
    fn poison_defers_the_full_hit_to_ticks() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Venom");
        queue(&mut session, SideId::Opponent, "Guard");

        let (next, report) = continued(resolve(&session));
        let attack = report.side(SideId::Challenger).attack.unwrap();
        assert_eq!(attack.damage, 15);
        assert_eq!(attack.absorbed, 5);
        assert_eq!(report.side(SideId::Challenger).damage_dealt, 0);
        assert_eq!(report.side(SideId::Challenger).poison_inflicted, Some(20));

        // first tick fires the round the stack lands
        let opponent = next.side(SideId::Opponent);
        assert_eq!(opponent.hp, 80);
        assert_eq!(opponent.status.poison, Some(StatusStack::new(20, 2)));
        assert_eq!(report.side(SideId::Opponent).ticks.poison_damage, 20);
    }

    #[test]
    fn poison_keeps_a_negative_bonus_the_instant_hit_floored() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).queued = Some(QueuedAction::Supported {
            support: "Sap".to_string(),
            with: "Venom".to_string(),
        });
        queue(&mut session, SideId::Opponent, "Guard");

        // 20 - 5 defense - 18 floors to 0 instant; the stack carries 20 - 18
        let (next, report) = continued(resolve(&session));
        assert_eq!(report.side(SideId::Challenger).attack.unwrap().damage, 0);
        assert_eq!(report.side(SideId::Challenger).poison_inflicted, Some(2));
        assert_eq!(next.side(SideId::Opponent).status.poison, Some(StatusStack::new(2, 2)));
        assert_eq!(next.side(SideId::Opponent).hp, 98);
    }

    #[test]
    fn barrier_blocks_paralyze() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Stun Rod");
        queue(&mut session, SideId::Opponent, "Barrier");

        let (next, report) = continued(resolve(&session));
        assert!(!report.side(SideId::Challenger).paralyzed_opponent);
        assert!(!next.side(SideId::Opponent).status.stunned);
        assert_eq!(next.side(SideId::Opponent).hp, 100);
    }

    #[test]
    fn dodged_paralyze_does_not_stun() {
        let mut session = duel();
        session.side_mut(SideId::Opponent).stats.dodge_pct = 100;
        queue(&mut session, SideId::Challenger, "Stun Rod");

        let (next, report) = continued(resolve(&session));
        assert!(report.side(SideId::Challenger).attack.unwrap().dodged);
        assert!(!report.side(SideId::Challenger).paralyzed_opponent);
        assert!(!next.side(SideId::Opponent).status.stunned);
    }

    #[test]
    fn dodged_poison_leaves_no_stack() {
        let mut session = duel();
        session.side_mut(SideId::Opponent).stats.dodge_pct = 100;
        queue(&mut session, SideId::Challenger, "Venom");

        let (next, report) = continued(resolve(&session));
        assert!(report.side(SideId::Challenger).attack.unwrap().dodged);
        assert_eq!(report.side(SideId::Challenger).poison_inflicted, None);
        assert_eq!(next.side(SideId::Opponent).status.poison, None);
        assert_eq!(next.side(SideId::Opponent).hp, 100);
    }

    #[test]
    fn stun_lasts_exactly_one_round() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Stun Rod");
        queue(&mut session, SideId::Opponent, "Sword");
        let (mut session, report) = continued(resolve(&session));
        assert!(report.side(SideId::Challenger).paralyzed_opponent);
        assert_eq!(session.side(SideId::Opponent).hp, 90);
        assert!(session.side(SideId::Opponent).status.stunned);
        assert!(!session.all_ready());

        // stunned round: a queued action is ignored and not counted
        queue(&mut session, SideId::Challenger, "Sword");
        queue(&mut session, SideId::Opponent, "Cannon");
        let (mut session, report) = continued(resolve(&session));
        assert!(report.side(SideId::Opponent).stunned);
        assert!(report.side(SideId::Opponent).attack.is_none());
        assert_eq!(session.side(SideId::Challenger).hp, 80);
        assert_eq!(session.side(SideId::Opponent).uses_of("Cannon"), 0);
        assert!(!session.side(SideId::Opponent).status.stunned);

        queue(&mut session, SideId::Opponent, "Sword");
        let (session, report) = continued(resolve(&session));
        assert!(!report.side(SideId::Opponent).stunned);
        assert_eq!(session.side(SideId::Challenger).hp, 60);
    }

    #[test]
    fn stunned_side_alone_is_enough_to_resolve() {
        let mut session = duel();
        session.side_mut(SideId::Opponent).status.stunned = true;

        let (next, report) = continued(resolve(&session));
        assert!(report.side(SideId::Opponent).stunned);
        assert!(!next.side(SideId::Opponent).status.stunned);
        assert_eq!(next.round, 2);
    }

    #[test]
    fn barrier_cancels_attack_and_its_recovery() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).hp = 50;
        queue(&mut session, SideId::Challenger, "Drain");
        queue(&mut session, SideId::Opponent, "Barrier");

        let (next, report) = continued(resolve(&session));
        let challenger = report.side(SideId::Challenger);
        assert!(challenger.attack.unwrap().cancelled_by_barrier);
        assert_eq!(challenger.recovered, 0);
        assert_eq!(next.side(SideId::Challenger).hp, 50);
        assert_eq!(next.side(SideId::Opponent).hp, 100);
    }

    #[test]
    fn unblocked_drain_heals() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).hp = 50;
        queue(&mut session, SideId::Challenger, "Drain");

        let (next, _) = continued(resolve(&session));
        assert_eq!(next.side(SideId::Challenger).hp, 60);
        assert_eq!(next.side(SideId::Opponent).hp, 80);
    }

    #[test]
    fn simultaneous_knockout_is_a_draw() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).hp = 10;
        session.side_mut(SideId::Opponent).hp = 10;
        queue(&mut session, SideId::Challenger, "Sword");
        queue(&mut session, SideId::Opponent, "Sword");

        let resolution = resolve(&session);
        let RoundResolution::Finished { outcome, session, .. } = resolution else {
            panic!("expected the battle to end");
        };
        assert_eq!(outcome, BattleOutcome::Draw);
        assert_eq!(outcome.winner(), None);
        assert!(session.sides.iter().all(SideState::is_defeated));
    }

    #[test]
    fn single_knockout_names_the_winner() {
        let mut session = duel();
        session.side_mut(SideId::Opponent).hp = 20;
        queue(&mut session, SideId::Challenger, "Cannon");
        queue(&mut session, SideId::Opponent, "Guard");

        let resolution = resolve(&session);
        assert!(resolution.is_finished());
        let RoundResolution::Finished { outcome, session, .. } = resolution else {
            unreachable!();
        };
        assert_eq!(
            outcome,
            BattleOutcome::Victory {
                winner: SideId::Challenger
            }
        );
        assert_eq!(outcome.loser(), Some(SideId::Opponent));
        assert_eq!(session.round, 1);
    }

    #[test]
    fn repair_clears_old_stacks_but_keeps_this_rounds() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).status.poison = Some(StatusStack::new(9, 2));
        queue(&mut session, SideId::Challenger, "Cleanse");
        queue(&mut session, SideId::Opponent, "Venom");

        let (next, report) = continued(resolve(&session));
        let challenger = next.side(SideId::Challenger);
        assert_eq!(challenger.status.poison, Some(StatusStack::new(20, 2)));
        assert_eq!(challenger.status.holy, Some(StatusStack::new(5, 2)));
        assert_eq!(challenger.hp, 85);
        assert!(report.side(SideId::Challenger).repaired);
        assert_eq!(report.side(SideId::Challenger).holy_applied, Some(5));
    }

    #[test]
    fn usage_and_specials_accumulate() {
        let mut session = duel();
        session.side_mut(SideId::Challenger).queued = Some(QueuedAction::Supported {
            support: "Atk+10".to_string(),
            with: "Cannon".to_string(),
        });
        queue(&mut session, SideId::Opponent, "Giga Cannon");

        let (next, report) = continued(resolve(&session));
        assert_eq!(report.side(SideId::Challenger).damage_dealt, 50);
        let challenger = next.side(SideId::Challenger);
        assert_eq!(challenger.uses_of("Atk+10"), 1);
        assert_eq!(challenger.uses_of("Cannon"), 1);
        assert!(challenger.specials_used.is_empty());

        let opponent = next.side(SideId::Opponent);
        assert_eq!(opponent.uses_of("Giga Cannon"), 1);
        assert!(opponent.specials_used.contains("Giga Cannon"));
    }

    #[test]
    fn drifted_catalog_entry_becomes_a_noop() {
        let mut session = duel();
        queue(&mut session, SideId::Challenger, "Retired Chip");
        queue(&mut session, SideId::Opponent, "Sword");

        let (next, report) = continued(resolve(&session));
        assert_eq!(
            report.side(SideId::Challenger).rejected,
            Some(Rejection::InvalidAction)
        );
        assert!(next.side(SideId::Challenger).usage.is_empty());
        assert_eq!(next.side(SideId::Challenger).hp, 80);
    }

    #[test]
    fn encounter_entity_picks_its_own_move() {
        let template = EntityTemplate::new("Mettaur", 40)
            .with_move(EffectDescriptor::new("Pickaxe", [EffectKind::Attack]).with_power(10));
        let mut session = BattleSession::encounter(
            SessionKey::new("net"),
            SideState::controlled(PlayerId(1), CombatStats::new(100, 0, 0)),
            &template,
            0,
            NOW,
        )
        .unwrap();
        queue(&mut session, SideId::Challenger, "Sword");

        let (next, report) = continued(resolve(&session));
        assert_eq!(report.side(SideId::Opponent).actions, vec!["Pickaxe"]);
        assert_eq!(report.side(SideId::Opponent).label, "Mettaur");
        assert_eq!(next.side(SideId::Challenger).hp, 90);
        assert_eq!(next.side(SideId::Opponent).hp, 20);
        assert_eq!(next.side(SideId::Opponent).uses_of("Pickaxe"), 1);
    }

    #[test]
    fn stand_ins_fight_without_submissions() {
        let chips = vec!["Sword".to_string()];
        let session = BattleSession::duel(
            SessionKey::new("lab"),
            SideState::stand_in(PlayerId(1), CombatStats::new(100, 0, 0), chips.clone()),
            SideState::stand_in(PlayerId(2), CombatStats::new(100, 0, 0), chips),
            0,
            NOW,
        )
        .unwrap();
        assert!(session.all_ready());

        let (next, _) = continued(resolve(&session));
        assert_eq!(next.side(SideId::Challenger).hp, 80);
        assert_eq!(next.side(SideId::Opponent).hp, 80);
    }

    #[test]
    fn stand_in_respects_usage_cap() {
        let mut session = BattleSession::duel(
            SessionKey::new("lab"),
            SideState::stand_in(
                PlayerId(1),
                CombatStats::new(100, 0, 0),
                vec!["Cannon".to_string(), "Sword".to_string()],
            ),
            SideState::controlled(PlayerId(2), CombatStats::new(100, 0, 0)),
            0,
            NOW,
        )
        .unwrap();
        session
            .side_mut(SideId::Challenger)
            .usage
            .insert("Sword".to_string(), 4);

        let (_, report) = continued(resolve(&session));
        assert_eq!(report.side(SideId::Challenger).actions, vec!["Cannon"]);
    }
}
