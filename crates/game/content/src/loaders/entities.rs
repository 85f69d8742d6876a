//! Autonomous entity catalog loader.
//!
//! Entities are viruses and bosses fought in encounters. Each carries its own
//! move list (at most four moves), odds and reward table.

use std::path::Path;

use battle_core::{BattleConfig, EntityTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::chips::check_descriptors;
use crate::loaders::{LoadResult, read_file};

/// Entity catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCatalog {
    pub entities: Vec<EntityTemplate>,
}

/// Loader for the entity catalog from RON files.
pub struct EntityLoader;

impl EntityLoader {
    /// Load the entity catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<EntityTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse and validate an entity catalog held in memory.
    pub fn parse(content: &str) -> LoadResult<Vec<EntityTemplate>> {
        let catalog: EntityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse entity catalog RON: {}", e))?;

        for entity in &catalog.entities {
            check_entity(entity)?;
        }
        Ok(catalog.entities)
    }
}

fn check_entity(entity: &EntityTemplate) -> LoadResult<()> {
    if entity.max_hp == 0 {
        anyhow::bail!("entity '{}' has zero max hp", entity.name);
    }
    if entity.dodge_pct > 100 || entity.crit_pct > 100 {
        anyhow::bail!(
            "entity '{}' odds out of range (dodge {}, crit {})",
            entity.name,
            entity.dodge_pct,
            entity.crit_pct
        );
    }
    let moves = entity.moves.len();
    if moves == 0 || moves > BattleConfig::MAX_ENTITY_MOVES {
        anyhow::bail!(
            "entity '{}' must carry 1..={} moves, found {}",
            entity.name,
            BattleConfig::MAX_ENTITY_MOVES,
            moves
        );
    }
    let (min, max) = entity.reward_range;
    if min > max {
        anyhow::bail!("entity '{}' reward range {}..{} is inverted", entity.name, min, max);
    }
    check_descriptors(&format!("move of '{}'", entity.name), &entity.moves)
}
