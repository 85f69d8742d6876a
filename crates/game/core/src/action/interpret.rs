use crate::effect::{EffectDescriptor, EffectKind};
use crate::env::CatalogOracle;
use crate::error::Rejection;

use super::QueuedAction;

/// Where the interpreter looks up descriptors for one side.
#[derive(Clone, Copy)]
pub struct ActionSource<'a> {
    /// Chip catalog for controlled sides.
    pub catalog: &'a dyn CatalogOracle,
    /// The autonomous entity's own moves; empty for controlled sides.
    pub moves: &'a [EffectDescriptor],
}

impl<'a> ActionSource<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, moves: &'a [EffectDescriptor]) -> Self {
        Self { catalog, moves }
    }

    fn chip(&self, name: &str) -> Result<&'a EffectDescriptor, Rejection> {
        self.catalog.chip(name).ok_or(Rejection::InvalidAction)
    }

    fn entity_move(&self, name: &str) -> Result<&'a EffectDescriptor, Rejection> {
        self.moves
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or(Rejection::InvalidAction)
    }
}

/// A name spent by this round's action, for cap and specials accounting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumedAction {
    pub name: String,
    pub special: bool,
}

impl ConsumedAction {
    fn of(descriptor: &EffectDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            special: descriptor.is_special(),
        }
    }
}

/// Normalized effect of one side's action for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub defense: u32,
    pub barrier: bool,
    /// Effect fed to the damage formula, if the action attacks.
    pub attack: Option<EffectDescriptor>,
    /// Bonus from a chained support chip.
    pub support_bonus: i32,
    /// Instant recovery. Zero whenever the action is holy.
    pub recovery: u32,
    /// Per-tick heal of a holy action.
    pub holy: Option<u32>,
    pub repair: bool,
    pub consumed: Vec<ConsumedAction>,
    /// Set when a stun forced this intent to a no-op.
    pub stunned: bool,
}

impl Intent {
    /// The forced no-op of a stunned side. Nothing is consumed.
    pub fn stunned() -> Self {
        Self {
            stunned: true,
            ..Self::default()
        }
    }

    fn absorb(&mut self, descriptor: &EffectDescriptor) {
        for kind in descriptor.kinds.kinds() {
            match kind {
                EffectKind::Defense => self.defense += descriptor.defense_value(),
                EffectKind::Barrier => self.barrier = true,
                EffectKind::Recovery => self.recovery += descriptor.recovery_value(),
                EffectKind::Attack | EffectKind::Break => {
                    self.attack = Some(descriptor.clone());
                }
                EffectKind::Holy => self.holy = Some(descriptor.holy_value()),
                EffectKind::Repair => self.repair = true,
                // modifiers read off the attack effect at resolution
                EffectKind::Paralyze | EffectKind::Poison => {}
                EffectKind::Support | EffectKind::Special => {}
            }
        }
        if self.holy.is_some() {
            self.recovery = 0;
        }
    }
}

/// Turn a side's queued action into this round's intent.
///
/// A stunned side yields [`Intent::stunned`] regardless of what was queued,
/// and an empty slot yields a plain no-op. A descriptor missing from the
/// catalog (or a support chip without the support kind) is
/// [`Rejection::InvalidAction`].
pub fn interpret(
    queued: Option<&QueuedAction>,
    stunned: bool,
    source: &ActionSource<'_>,
) -> Result<Intent, Rejection> {
    if stunned {
        return Ok(Intent::stunned());
    }
    let Some(queued) = queued else {
        return Ok(Intent::default());
    };

    let mut intent = Intent::default();
    match queued {
        QueuedAction::Chip { name } => {
            let chip = source.chip(name)?;
            intent.absorb(chip);
            intent.consumed.push(ConsumedAction::of(chip));
        }
        QueuedAction::Move { name } => {
            let entity_move = source.entity_move(name)?;
            intent.absorb(entity_move);
            intent.consumed.push(ConsumedAction::of(entity_move));
        }
        QueuedAction::Supported { support, with } => {
            let support = source.chip(support)?;
            if !support.has(EffectKind::Support) {
                return Err(Rejection::InvalidAction);
            }
            let with = source.chip(with)?;
            intent.absorb(with);
            intent.support_bonus = support.support_bonus();
            intent.consumed.push(ConsumedAction::of(support));
            intent.consumed.push(ConsumedAction::of(with));
        }
    }
    Ok(intent)
}
