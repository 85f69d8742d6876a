//! Chip catalog loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::EffectDescriptor;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Chip catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipCatalog {
    pub chips: Vec<EffectDescriptor>,
}

/// Loader for the chip catalog from RON files.
pub struct ChipLoader;

impl ChipLoader {
    /// Load the chip catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a ChipCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<EffectDescriptor>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse and validate a chip catalog held in memory.
    pub fn parse(content: &str) -> LoadResult<Vec<EffectDescriptor>> {
        let catalog: ChipCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse chip catalog RON: {}", e))?;

        check_descriptors("chip", &catalog.chips)?;
        Ok(catalog.chips)
    }
}

/// Rejects blank names, empty kind sets and case-insensitive duplicates.
pub(crate) fn check_descriptors(label: &str, descriptors: &[EffectDescriptor]) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for descriptor in descriptors {
        if descriptor.name.trim().is_empty() {
            anyhow::bail!("{} with an empty name", label);
        }
        if descriptor.kinds.is_empty() {
            anyhow::bail!("{} '{}' declares no kinds", label, descriptor.name);
        }
        if !seen.insert(descriptor.name.to_ascii_lowercase()) {
            anyhow::bail!("duplicate {} '{}'", label, descriptor.name);
        }
    }
    Ok(())
}
