//! Damage calculation for a single attack direction.

use crate::config::BattleConfig;
use crate::effect::{EffectDescriptor, EffectKind};
use crate::env::RandomSource;

/// Everything the formula needs about one attacker → defender direction.
#[derive(Clone, Copy, Debug)]
pub struct AttackInput<'a> {
    /// Attacker's effect (must carry attack or break).
    pub effect: &'a EffectDescriptor,
    /// Bonus from a chained support chip, added after defense.
    pub support_bonus: i32,
    /// Defender's defense value for this round.
    pub defender_defense: u32,
    /// Whether the defender raised a barrier this round.
    pub defender_barrier: bool,
    pub defender_dodge_pct: u8,
    pub attacker_crit_pct: u8,
}

/// Result of resolving one attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    /// Damage after defense and support bonus (never negative).
    pub damage: u32,
    pub crit: bool,
    pub dodged: bool,
    pub cancelled_by_barrier: bool,
    /// Portion of the pre-defense hit soaked by the defender's defense.
    pub absorbed: u32,
    /// Pre-defense hit plus support bonus, floored at zero. Poison conversion
    /// carries this as its per-tick amount.
    pub unmitigated: u32,
}

impl AttackOutcome {
    /// Whether the attack reached the defender (not dodged, not cancelled).
    pub fn landed(&self) -> bool {
        !self.dodged && !self.cancelled_by_barrier
    }
}

/// Resolve one attack against one defender.
///
/// # Order
///
/// ```text
/// 1. barrier (non-break)  -> 0, cancelled
/// 2. dodge roll           -> 0, dodged
/// 3. crit roll            -> power * crit_multiplier (floored)
/// 4. defense              -> break: ignored; else effective = max(0, pre - def)
/// 5. final                -> max(0, effective + support_bonus)
/// ```
///
/// The dodge roll is drawn before the crit roll; neither is drawn when a
/// barrier cancels the attack.
pub fn resolve_attack(
    input: &AttackInput<'_>,
    config: &BattleConfig,
    rng: &mut impl RandomSource,
) -> AttackOutcome {
    let is_break = input.effect.has(EffectKind::Break);

    if input.defender_barrier && !is_break {
        return AttackOutcome {
            cancelled_by_barrier: true,
            ..AttackOutcome::default()
        };
    }

    if rng.roll_pct(input.defender_dodge_pct) {
        return AttackOutcome {
            dodged: true,
            ..AttackOutcome::default()
        };
    }

    let crit = rng.roll_pct(input.attacker_crit_pct);
    let base = input.effect.power();
    let pre_defense = if crit { config.apply_crit(base) } else { base };

    let (effective, absorbed) = if is_break {
        (pre_defense, 0)
    } else {
        let effective = pre_defense.saturating_sub(input.defender_defense);
        (effective, pre_defense - effective)
    };

    let with_bonus = |value: u32| (value as i64 + input.support_bonus as i64).max(0) as u32;

    AttackOutcome {
        damage: with_bonus(effective),
        crit,
        dodged: false,
        cancelled_by_barrier: false,
        absorbed,
        unmitigated: with_bonus(pre_defense),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    fn input(effect: &EffectDescriptor) -> AttackInput<'_> {
        AttackInput {
            effect,
            support_bonus: 0,
            defender_defense: 0,
            defender_barrier: false,
            defender_dodge_pct: 0,
            attacker_crit_pct: 0,
        }
    }

    #[test]
    fn barrier_cancels_without_rolling() {
        let sword = EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(40);
        let mut rng = ScriptedRng::new(vec![0.0]);
        let outcome = resolve_attack(
            &AttackInput {
                defender_barrier: true,
                ..input(&sword)
            },
            &BattleConfig::default(),
            &mut rng,
        );

        assert_eq!(outcome.damage, 0);
        assert!(outcome.cancelled_by_barrier);
        assert!(!outcome.landed());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn break_pierces_barrier_and_defense() {
        let crusher = EffectDescriptor::new("Crusher", [EffectKind::Attack, EffectKind::Break])
            .with_power(30);
        let outcome = resolve_attack(
            &AttackInput {
                defender_barrier: true,
                defender_defense: 25,
                ..input(&crusher)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::never(),
        );

        assert_eq!(outcome.damage, 30);
        assert_eq!(outcome.absorbed, 0);
        assert!(outcome.landed());
    }

    #[test]
    fn dodge_zeroes_damage() {
        let sword = EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(40);
        let outcome = resolve_attack(
            &AttackInput {
                defender_dodge_pct: 50,
                ..input(&sword)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.2]),
        );

        assert!(outcome.dodged);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn crit_multiplies_before_defense() {
        let sword = EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(40);
        // dodge roll fails (0.9 >= 0%), crit roll succeeds (0.1 < 50%)
        let outcome = resolve_attack(
            &AttackInput {
                attacker_crit_pct: 50,
                ..input(&sword)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::new(vec![0.9, 0.1]),
        );

        assert!(outcome.crit);
        assert_eq!(outcome.damage, 60);
    }

    #[test]
    fn defense_mitigates_and_reports_absorbed() {
        let sword = EffectDescriptor::new("Sword", [EffectKind::Attack]).with_power(20);
        let outcome = resolve_attack(
            &AttackInput {
                defender_defense: 5,
                ..input(&sword)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::never(),
        );

        assert_eq!(outcome.damage, 15);
        assert_eq!(outcome.absorbed, 5);
        assert_eq!(outcome.unmitigated, 20);
    }

    #[test]
    fn defense_larger_than_hit_absorbs_everything() {
        let jab = EffectDescriptor::new("Jab", [EffectKind::Attack]).with_power(10);
        let outcome = resolve_attack(
            &AttackInput {
                defender_defense: 30,
                support_bonus: 4,
                ..input(&jab)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::never(),
        );

        assert_eq!(outcome.absorbed, 10);
        assert_eq!(outcome.damage, 4);
    }

    #[test]
    fn negative_bonus_floors_at_zero() {
        let jab = EffectDescriptor::new("Jab", [EffectKind::Attack]).with_power(10);
        let outcome = resolve_attack(
            &AttackInput {
                support_bonus: -25,
                ..input(&jab)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::never(),
        );

        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.unmitigated, 0);
    }

    #[test]
    fn unmitigated_applies_bonus_before_the_floor() {
        let venom = EffectDescriptor::new("Venom", [EffectKind::Attack]).with_power(10);
        let outcome = resolve_attack(
            &AttackInput {
                defender_defense: 8,
                support_bonus: -5,
                ..input(&venom)
            },
            &BattleConfig::default(),
            &mut ScriptedRng::never(),
        );

        // effective 2 - 5 floors to 0, but the pre-defense hit is 10 - 5
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.absorbed, 8);
        assert_eq!(outcome.unmitigated, 5);
    }
}
