//! Move selection for autopiloted sides.
//!
//! The selector is deliberately simple: uniform choice over eligible moves,
//! with two anti-stalling caps on defense-like moves and a one-time exclusion
//! for specials already spent.

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::effect::EffectDescriptor;
use crate::env::RandomSource;

/// Defensive-move bookkeeping for one autopiloted side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiCounters {
    /// Defense-like moves chosen this battle. Never decreases.
    pub total_defensive: u32,
    /// Defense-like moves chosen in a row.
    pub defensive_streak: u32,
}

impl AiCounters {
    /// Record a selection.
    pub fn record(&mut self, defense_like: bool) {
        if defense_like {
            self.total_defensive += 1;
            self.defensive_streak += 1;
        } else {
            self.defensive_streak = 0;
        }
    }
}

/// Pick the next move and record it against `counters`.
///
/// # Selection
///
/// ```text
/// eligible = moves - (specials already used)
/// streak >= streak cap  -> random offensive move, else fall through
/// total  >= total cap   -> random offensive move, else random eligible
/// otherwise             -> random eligible
/// ```
///
/// Returns `None` only when nothing is eligible.
pub fn choose_move<'a>(
    moves: &'a [EffectDescriptor],
    specials_used: &BTreeSet<String>,
    counters: &mut AiCounters,
    config: &BattleConfig,
    rng: &mut impl RandomSource,
) -> Option<&'a EffectDescriptor> {
    let eligible: Vec<&EffectDescriptor> = moves
        .iter()
        .filter(|m| !(m.is_special() && specials_used.contains(&m.name)))
        .collect();
    if eligible.is_empty() {
        return None;
    }

    let non_defensive: Vec<&EffectDescriptor> = eligible
        .iter()
        .copied()
        .filter(|m| !m.kinds.is_defense_like())
        .collect();

    let pool = if counters.defensive_streak >= config.defense_streak_cap
        && !non_defensive.is_empty()
    {
        &non_defensive
    } else if counters.total_defensive >= config.defense_total_cap && !non_defensive.is_empty() {
        &non_defensive
    } else {
        &eligible
    };

    let chosen = pool[rng.pick_index(pool.len())];
    counters.record(chosen.kinds.is_defense_like());
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;
    use crate::env::ScriptedRng;

    fn moves() -> Vec<EffectDescriptor> {
        vec![
            EffectDescriptor::new("Shield", [EffectKind::Barrier]),
            EffectDescriptor::new("Guard", [EffectKind::Defense]).with_defense(10),
            EffectDescriptor::new("Cannon", [EffectKind::Attack]).with_power(20),
        ]
    }

    #[test]
    fn defensive_pick_bumps_both_counters() {
        let moves = moves();
        let mut counters = AiCounters::default();
        // index 0 of 3
        let chosen = choose_move(
            &moves,
            &BTreeSet::new(),
            &mut counters,
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.0]),
        )
        .unwrap();

        assert_eq!(chosen.name, "Shield");
        assert_eq!(
            counters,
            AiCounters {
                total_defensive: 1,
                defensive_streak: 1
            }
        );
    }

    #[test]
    fn streak_cap_forces_offense() {
        let moves = moves();
        let mut counters = AiCounters {
            total_defensive: 2,
            defensive_streak: 2,
        };
        // 0.0 would pick Shield from the full list
        let chosen = choose_move(
            &moves,
            &BTreeSet::new(),
            &mut counters,
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.0]),
        )
        .unwrap();

        assert_eq!(chosen.name, "Cannon");
        assert_eq!(counters.defensive_streak, 0);
        assert_eq!(counters.total_defensive, 2);
    }

    #[test]
    fn total_cap_forces_offense() {
        let moves = moves();
        let mut counters = AiCounters {
            total_defensive: 5,
            defensive_streak: 0,
        };
        let chosen = choose_move(
            &moves,
            &BTreeSet::new(),
            &mut counters,
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.0]),
        )
        .unwrap();
        assert_eq!(chosen.name, "Cannon");
    }

    #[test]
    fn caps_fall_back_when_only_defense_remains() {
        let moves = vec![EffectDescriptor::new("Shield", [EffectKind::Barrier])];
        let mut counters = AiCounters {
            total_defensive: 9,
            defensive_streak: 4,
        };
        let chosen = choose_move(
            &moves,
            &BTreeSet::new(),
            &mut counters,
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.5]),
        )
        .unwrap();

        assert_eq!(chosen.name, "Shield");
        assert_eq!(counters.total_defensive, 10);
    }

    #[test]
    fn spent_specials_are_excluded() {
        let moves = vec![
            EffectDescriptor::new("Finale", [EffectKind::Attack])
                .with_power(80)
                .with_special(),
            EffectDescriptor::new("Jab", [EffectKind::Attack]).with_power(5),
        ];
        let used = BTreeSet::from(["Finale".to_string()]);
        let mut counters = AiCounters::default();

        for roll in [0.0, 0.4, 0.9] {
            let chosen = choose_move(
                &moves,
                &used,
                &mut counters,
                &BattleConfig::default(),
                &mut ScriptedRng::new(vec![roll]),
            )
            .unwrap();
            assert_eq!(chosen.name, "Jab");
        }
    }

    #[test]
    fn nothing_eligible_yields_none() {
        let moves = vec![EffectDescriptor::new("Finale", [EffectKind::Special])];
        let used = BTreeSet::from(["Finale".to_string()]);
        let chosen = choose_move(
            &moves,
            &used,
            &mut AiCounters::default(),
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.0]),
        );
        assert!(chosen.is_none());
    }
}
