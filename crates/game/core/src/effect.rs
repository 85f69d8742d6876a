//! Effect descriptors and the closed set of capability kinds.
//!
//! Catalog entries describe chips and autonomous moves as a set of kinds plus a
//! handful of numeric fields. Kinds are parsed once at the catalog boundary into
//! [`EffectKinds`], so every later branch is a flag test against a closed set
//! instead of a string comparison.

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A single capability tag carried by an effect descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EffectKind {
    /// Deals damage through the damage formula.
    Attack,
    /// Attack that ignores defense and pierces barriers.
    Break,
    /// Bonus-only chip chained onto another chip.
    Support,
    /// Cancels an incoming non-break attack for the round.
    Barrier,
    /// Adds its value to the actor's defense for the round.
    Defense,
    /// Heals the actor instantly.
    Recovery,
    /// Stuns the defender for the next round when it lands.
    Paralyze,
    /// Converts the landed hit into a three-tick poison stack.
    Poison,
    /// Heals the actor over three ticks.
    Holy,
    /// Clears the actor's own poison and holy stacks.
    Repair,
    /// Usable at most once per battle.
    Special,
}

impl EffectKind {
    /// Flag bit backing this kind inside [`EffectKinds`].
    pub const fn flag(self) -> EffectKinds {
        match self {
            EffectKind::Attack => EffectKinds::ATTACK,
            EffectKind::Break => EffectKinds::BREAK,
            EffectKind::Support => EffectKinds::SUPPORT,
            EffectKind::Barrier => EffectKinds::BARRIER,
            EffectKind::Defense => EffectKinds::DEFENSE,
            EffectKind::Recovery => EffectKinds::RECOVERY,
            EffectKind::Paralyze => EffectKinds::PARALYZE,
            EffectKind::Poison => EffectKinds::POISON,
            EffectKind::Holy => EffectKinds::HOLY,
            EffectKind::Repair => EffectKinds::REPAIR,
            EffectKind::Special => EffectKinds::SPECIAL,
        }
    }
}

bitflags! {
    /// Set of capability kinds carried by one descriptor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EffectKinds: u16 {
        const ATTACK   = 1 << 0;
        const BREAK    = 1 << 1;
        const SUPPORT  = 1 << 2;
        const BARRIER  = 1 << 3;
        const DEFENSE  = 1 << 4;
        const RECOVERY = 1 << 5;
        const PARALYZE = 1 << 6;
        const POISON   = 1 << 7;
        const HOLY     = 1 << 8;
        const REPAIR   = 1 << 9;
        const SPECIAL  = 1 << 10;
    }
}

impl EffectKinds {
    /// Whether the descriptor deals damage (attack or break).
    pub fn is_offensive(self) -> bool {
        self.intersects(Self::ATTACK | Self::BREAK)
    }

    /// Whether the AI counts this as a defensive move (defense or barrier).
    pub fn is_defense_like(self) -> bool {
        self.intersects(Self::DEFENSE | Self::BARRIER)
    }

    /// Iterates the individual kinds present in this set, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = EffectKind> {
        EffectKind::iter().filter(move |kind| self.contains(kind.flag()))
    }
}

impl FromIterator<EffectKind> for EffectKinds {
    fn from_iter<I: IntoIterator<Item = EffectKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EffectKinds::empty(), |acc, kind| acc | kind.flag())
    }
}

// Kinds travel as a list of lowercase names (`["attack", "poison"]`) in
// content files and persisted records.
#[cfg(feature = "serde")]
impl serde::Serialize for EffectKinds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.bits().count_ones() as usize))?;
        for kind in self.kinds() {
            seq.serialize_element(<&'static str>::from(kind))?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EffectKinds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let names = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                name.parse::<EffectKind>()
                    .map_err(|_| D::Error::custom(format!("unknown effect kind `{name}`")))
            })
            .collect()
    }
}

/// Catalog description of a chip or an autonomous move.
///
/// Numeric fields are optional in the catalog; absent values read as zero
/// through the accessor methods.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectDescriptor {
    pub name: String,
    pub kinds: EffectKinds,
    pub power: Option<u32>,
    pub defense: Option<u32>,
    pub heal: Option<u32>,
    pub rec: Option<u32>,
    pub bonus: Option<i32>,
    pub special: bool,
}

impl EffectDescriptor {
    pub fn new(name: impl Into<String>, kinds: impl IntoIterator<Item = EffectKind>) -> Self {
        Self {
            name: name.into(),
            kinds: kinds.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn with_heal(mut self, heal: u32) -> Self {
        self.heal = Some(heal);
        self
    }

    pub fn with_rec(mut self, rec: u32) -> Self {
        self.rec = Some(rec);
        self
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn with_special(mut self) -> Self {
        self.special = true;
        self
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.kinds.contains(kind.flag())
    }

    /// One-time actions are flagged either by the `special` field or the kind.
    pub fn is_special(&self) -> bool {
        self.special || self.has(EffectKind::Special)
    }

    pub fn power(&self) -> u32 {
        self.power.unwrap_or(0)
    }

    /// Defense granted for the round: `defense`, falling back to `power`.
    pub fn defense_value(&self) -> u32 {
        self.defense.or(self.power).unwrap_or(0)
    }

    pub fn support_bonus(&self) -> i32 {
        self.bonus.unwrap_or(0)
    }

    /// Instant recovery amount: `heal`, falling back to `rec`.
    pub fn recovery_value(&self) -> u32 {
        self.heal.or(self.rec).unwrap_or(0)
    }

    /// Per-tick holy amount: `heal`, then `rec`, then raw `power`.
    pub fn holy_value(&self) -> u32 {
        self.heal.or(self.rec).or(self.power).unwrap_or(0)
    }
}
