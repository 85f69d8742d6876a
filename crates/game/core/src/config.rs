/// Battle configuration constants and tunable parameters.
///
/// Every numeric knob the resolver consults lives here so balancing is a data
/// change, not a code change. Content files only need to name the fields they
/// override; the rest fall back to [`BattleConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// How many times a single action name may be played in one battle.
    pub usage_cap: u32,
    /// Consecutive defense-like AI moves before the selector prefers offense.
    pub defense_streak_cap: u32,
    /// Total defense-like AI moves per battle before the selector prefers offense.
    pub defense_total_cap: u32,
    /// Number of ticks a freshly applied poison or holy stack lasts.
    pub status_ticks: u8,
    /// Critical-hit multiplier as a percentage (150 = x1.5, floored).
    pub crit_multiplier_pct: u32,
    /// Probability that a defeated entity drops one item from its drop list.
    pub drop_chance: f64,
    /// Seconds a round stays open before the round timer resolves it.
    pub round_timeout_secs: u64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of moves an autonomous entity carries into battle.
    pub const MAX_ENTITY_MOVES: usize = 4;
    /// Number of sides in every battle.
    pub const SIDES: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_USAGE_CAP: u32 = 4;
    pub const DEFAULT_DEFENSE_STREAK_CAP: u32 = 2;
    pub const DEFAULT_DEFENSE_TOTAL_CAP: u32 = 5;
    pub const DEFAULT_STATUS_TICKS: u8 = 3;
    pub const DEFAULT_CRIT_MULTIPLIER_PCT: u32 = 150;
    pub const DEFAULT_DROP_CHANCE: f64 = 0.33;
    pub const DEFAULT_ROUND_TIMEOUT_SECS: u64 = 60;

    pub fn new() -> Self {
        Self {
            usage_cap: Self::DEFAULT_USAGE_CAP,
            defense_streak_cap: Self::DEFAULT_DEFENSE_STREAK_CAP,
            defense_total_cap: Self::DEFAULT_DEFENSE_TOTAL_CAP,
            status_ticks: Self::DEFAULT_STATUS_TICKS,
            crit_multiplier_pct: Self::DEFAULT_CRIT_MULTIPLIER_PCT,
            drop_chance: Self::DEFAULT_DROP_CHANCE,
            round_timeout_secs: Self::DEFAULT_ROUND_TIMEOUT_SECS,
        }
    }

    pub fn with_usage_cap(mut self, usage_cap: u32) -> Self {
        self.usage_cap = usage_cap;
        self
    }

    pub fn with_round_timeout_secs(mut self, secs: u64) -> Self {
        self.round_timeout_secs = secs;
        self
    }

    /// Applies the critical multiplier to a base power value (floored).
    pub fn apply_crit(&self, power: u32) -> u32 {
        ((power as u64 * self.crit_multiplier_pct as u64) / 100) as u32
    }

    /// Deadline of a round that starts at `now_ms`.
    pub fn deadline_after(&self, now_ms: u64) -> u64 {
        now_ms.saturating_add(self.round_timeout_secs.saturating_mul(1000))
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
