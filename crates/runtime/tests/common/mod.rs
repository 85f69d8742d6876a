#![allow(dead_code)]

use std::sync::Arc;

use battle_core::{
    BattleConfig, CombatStats, EffectDescriptor, EffectKind, EntityTemplate, PlayerId,
};
use runtime::{
    ActiveTask, BattleHandle, CatalogOracleImpl, InMemoryPlayerRepo, PlayerRecord, Runtime,
    RuntimeConfig, SessionRepository, TaskGoal,
};

pub const ALICE: PlayerId = PlayerId(1);
pub const BOB: PlayerId = PlayerId(2);
pub const CAROL: PlayerId = PlayerId(3);

/// Catalog with no randomness in play: every combatant has 0% dodge and crit.
pub fn catalog() -> CatalogOracleImpl {
    CatalogOracleImpl::new()
        .with_chip(EffectDescriptor::new("Cannon", [EffectKind::Attack]).with_power(40))
        .with_chip(EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(30))
        .with_chip(EffectDescriptor::new("Guard", [EffectKind::Defense]).with_defense(20))
        .with_chip(EffectDescriptor::new("Nuke", [EffectKind::Attack]).with_power(200))
        .with_chip(EffectDescriptor::new("Atk+10", [EffectKind::Support]).with_bonus(10))
        .with_entity(
            EntityTemplate::new("Dummy", 50)
                .with_move(EffectDescriptor::new("Poke", [EffectKind::Attack]).with_power(5))
                .with_rewards(10, 10, &["Cannon"]),
        )
        .with_entity(
            EntityTemplate::new("Brute", 500)
                .with_move(EffectDescriptor::new("Smash", [EffectKind::Attack]).with_power(200)),
        )
}

pub fn player() -> PlayerRecord {
    PlayerRecord::new(CombatStats::new(100, 0, 0))
        .with_chip("Cannon", 9)
        .with_chip("Sword", 9)
        .with_chip("Guard", 9)
        .with_chip("Atk+10", 2)
}

pub fn ledger() -> Arc<InMemoryPlayerRepo> {
    Arc::new(
        InMemoryPlayerRepo::new()
            .with_player(ALICE, player())
            .with_player(BOB, player().with_chip("Nuke", 2))
            .with_player(
                CAROL,
                player().with_chip("Nuke", 1).with_task(ActiveTask::new(
                    TaskGoal::DefeatEntity {
                        entity: "Dummy".to_string(),
                    },
                    100,
                )),
            ),
    )
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_battle(BattleConfig {
        drop_chance: 1.0,
        ..BattleConfig::default()
    })
}

pub async fn start(players: Arc<InMemoryPlayerRepo>) -> (Runtime, BattleHandle) {
    let runtime = Runtime::builder()
        .config(config())
        .catalog(Arc::new(catalog()))
        .players(players)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();
    (runtime, handle)
}

pub async fn start_with_sessions(
    players: Arc<InMemoryPlayerRepo>,
    sessions: Arc<dyn SessionRepository>,
) -> (Runtime, BattleHandle) {
    let runtime = Runtime::builder()
        .config(config())
        .catalog(Arc::new(catalog()))
        .players(players)
        .sessions(sessions)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();
    (runtime, handle)
}
