//! Content factory for loading every content file from one data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, EffectDescriptor, EntityTemplate};

use crate::loaders::{ChipLoader, ConfigLoader, EntityLoader, LoadResult};

/// Everything the runtime catalog needs, loaded in one go.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: BattleConfig,
    pub chips: Vec<EffectDescriptor>,
    pub entities: Vec<EntityTemplate>,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── chips.ron
/// └── entities.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load battle rules from `battle.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the chip catalog from `chips.ron`.
    pub fn load_chips(&self) -> LoadResult<Vec<EffectDescriptor>> {
        ChipLoader::load(&self.data_dir.join("chips.ron"))
    }

    /// Load the entity catalog from `entities.ron`.
    pub fn load_entities(&self) -> LoadResult<Vec<EntityTemplate>> {
        EntityLoader::load(&self.data_dir.join("entities.ron"))
    }

    /// Load config, chips and entities together.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            chips: self.load_chips()?,
            entities: self.load_entities()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
