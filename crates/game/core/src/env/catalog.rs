use crate::effect::EffectDescriptor;

/// Read-only lookup into the chip and entity catalog.
///
/// The catalog is loaded and refreshed outside the rules; lookups are by
/// display name. Implementations decide on case folding.
pub trait CatalogOracle: Send + Sync {
    /// Chip (player action) descriptor by name.
    fn chip(&self, name: &str) -> Option<&EffectDescriptor>;

    /// Autonomous entity template by name.
    fn entity(&self, name: &str) -> Option<&EntityTemplate>;

    /// Whether a drop-list entry names something that can be granted.
    fn is_grantable(&self, item: &str) -> bool {
        self.chip(item).is_some()
    }
}

/// Catalog description of an autonomous combatant (virus or boss).
///
/// Encounters snapshot these values at start, so later catalog edits never
/// change a battle already in progress.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntityTemplate {
    pub name: String,
    pub max_hp: u32,
    pub dodge_pct: u8,
    pub crit_pct: u8,
    pub is_boss: bool,
    pub moves: Vec<EffectDescriptor>,
    pub reward_range: (u32, u32),
    pub drop_list: Vec<String>,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            ..Self::default()
        }
    }

    pub fn with_odds(mut self, dodge_pct: u8, crit_pct: u8) -> Self {
        self.dodge_pct = dodge_pct;
        self.crit_pct = crit_pct;
        self
    }

    pub fn with_move(mut self, descriptor: EffectDescriptor) -> Self {
        self.moves.push(descriptor);
        self
    }

    pub fn with_rewards(mut self, min: u32, max: u32, drops: &[&str]) -> Self {
        self.reward_range = (min, max);
        self.drop_list = drops.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }
}
