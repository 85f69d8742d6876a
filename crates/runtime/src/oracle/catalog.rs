//! [`battle_core::CatalogOracle`] backed by in-memory maps.
use std::collections::HashMap;

use battle_content::ContentBundle;
use battle_core::{CatalogOracle, EffectDescriptor, EntityTemplate};

/// CatalogOracle implementation with static chip and entity definitions.
///
/// Lookups ignore ASCII case; the stored descriptors keep their display
/// spelling, which is what ends up in usage counters and inventories.
pub struct CatalogOracleImpl {
    chips: HashMap<String, EffectDescriptor>,
    entities: HashMap<String, EntityTemplate>,
}

impl CatalogOracleImpl {
    pub fn new() -> Self {
        Self {
            chips: HashMap::new(),
            entities: HashMap::new(),
        }
    }

    /// Catalog over everything a content bundle loaded.
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        let mut catalog = Self::new();
        for chip in &bundle.chips {
            catalog.add_chip(chip.clone());
        }
        for entity in &bundle.entities {
            catalog.add_entity(entity.clone());
        }
        catalog
    }

    /// Add a chip definition, replacing one with the same name
    pub fn add_chip(&mut self, chip: EffectDescriptor) {
        self.chips.insert(chip.name.to_ascii_lowercase(), chip);
    }

    /// Add an entity template, replacing one with the same name
    pub fn add_entity(&mut self, entity: EntityTemplate) {
        self.entities.insert(entity.name.to_ascii_lowercase(), entity);
    }

    pub fn with_chip(mut self, chip: EffectDescriptor) -> Self {
        self.add_chip(chip);
        self
    }

    pub fn with_entity(mut self, entity: EntityTemplate) -> Self {
        self.add_entity(entity);
        self
    }

    pub fn chip_count(&self) -> usize {
        self.chips.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl Default for CatalogOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogOracle for CatalogOracleImpl {
    fn chip(&self, name: &str) -> Option<&EffectDescriptor> {
        self.chips.get(&name.to_ascii_lowercase())
    }

    fn entity(&self, name: &str) -> Option<&EntityTemplate> {
        self.entities.get(&name.to_ascii_lowercase())
    }
}
