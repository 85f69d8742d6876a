//! Encounter rewards.
//!
//! Paid to the controlled player when an encounter ends with the entity
//! defeated: a currency amount from the entity's reward range, a chance at one
//! item from its drop list, and the player's active task if this win
//! satisfies it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use battle_core::{BattleConfig, CatalogOracle, EntitySnapshot, PlayerId, RandomSource};

use crate::repository::{ActiveTask, PlayerRepository, Result, TaskGoal};

/// What a player received for winning an encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub currency: u64,
    /// Dropped item, spelled as the catalog spells it.
    pub item: Option<String>,
    /// Reward of the task this win completed.
    pub task_reward: Option<u64>,
}

/// Roll the currency amount and the drop for a defeated entity.
pub fn roll_rewards(
    entity: &EntitySnapshot,
    config: &BattleConfig,
    catalog: &dyn CatalogOracle,
    rng: &mut impl RandomSource,
) -> RewardGrant {
    let (min, max) = entity.reward_range;
    let currency = rng.range_inclusive(min, max) as u64;

    let mut item = None;
    if !entity.drop_list.is_empty() && rng.next_unit() < config.drop_chance {
        let pick = &entity.drop_list[rng.pick_index(entity.drop_list.len())];
        if catalog.is_grantable(pick) {
            item = Some(
                catalog
                    .chip(pick)
                    .map(|chip| chip.name.clone())
                    .unwrap_or_else(|| pick.clone()),
            );
        } else {
            warn!(
                target: "runtime::rewards",
                entity = %entity.name,
                item = %pick,
                "drop list names an item the catalog cannot grant"
            );
        }
    }

    RewardGrant {
        currency,
        item,
        task_reward: None,
    }
}

/// Whether winning against `entity` with `played` chips satisfies `task`.
pub fn task_satisfied(
    task: &ActiveTask,
    entity: &EntitySnapshot,
    played: &BTreeMap<String, u32>,
) -> bool {
    if task.completed {
        return false;
    }
    match &task.goal {
        TaskGoal::DefeatEntity { entity: wanted } => wanted.eq_ignore_ascii_case(&entity.name),
        TaskGoal::PlayChip { chip } => played
            .iter()
            .any(|(name, &uses)| uses > 0 && name.eq_ignore_ascii_case(chip)),
    }
}

/// Roll and pay every reward for an encounter `player` just won.
///
/// `played` is the usage map of the player's side at the end of the battle.
pub fn grant_encounter_rewards(
    players: &dyn PlayerRepository,
    catalog: &dyn CatalogOracle,
    config: &BattleConfig,
    player: PlayerId,
    entity: &EntitySnapshot,
    played: &BTreeMap<String, u32>,
    rng: &mut impl RandomSource,
) -> Result<RewardGrant> {
    let mut grant = roll_rewards(entity, config, catalog, rng);

    players.grant_currency(player, grant.currency)?;
    if let Some(item) = &grant.item {
        players.grant_item(player, item, catalog.chip(item).is_some())?;
    }

    let satisfied = players
        .load(player)?
        .and_then(|record| record.task)
        .is_some_and(|task| task_satisfied(&task, entity, played));
    if satisfied {
        grant.task_reward = players.complete_task(player)?;
    }

    debug!(
        target: "runtime::rewards",
        player = %player,
        entity = %entity.name,
        currency = grant.currency,
        item = ?grant.item,
        task_reward = ?grant.task_reward,
        "granted encounter rewards"
    );
    Ok(grant)
}
