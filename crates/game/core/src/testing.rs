//! In-memory catalog used by unit tests.

use crate::effect::EffectDescriptor;
use crate::env::{CatalogOracle, EntityTemplate};

#[derive(Default)]
pub(crate) struct TestCatalog {
    chips: Vec<EffectDescriptor>,
    entities: Vec<EntityTemplate>,
}

impl TestCatalog {
    pub(crate) fn with_chip(mut self, chip: EffectDescriptor) -> Self {
        self.chips.push(chip);
        self
    }

    pub(crate) fn with_entity(mut self, entity: EntityTemplate) -> Self {
        self.entities.push(entity);
        self
    }
}

impl CatalogOracle for TestCatalog {
    fn chip(&self, name: &str) -> Option<&EffectDescriptor> {
        self.chips
            .iter()
            .find(|chip| chip.name.eq_ignore_ascii_case(name))
    }

    fn entity(&self, name: &str) -> Option<&EntityTemplate> {
        self.entities
            .iter()
            .find(|entity| entity.name.eq_ignore_ascii_case(name))
    }
}
