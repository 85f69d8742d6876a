//! Per-combatant status slots: stun, poison and holy.
//!
//! Each slot holds at most one stack. Re-applying a status replaces the stack
//! outright and restarts its tick count; stacks never add up.

/// One active poison or holy stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusStack {
    /// HP removed (poison) or restored (holy) per tick. Always non-zero.
    pub amount: u32,
    /// Remaining ticks, including the one about to fire.
    pub ticks_left: u8,
}

impl StatusStack {
    pub fn new(amount: u32, ticks_left: u8) -> Self {
        Self { amount, ticks_left }
    }
}

/// Amounts produced by one tick of a side's stacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    pub poison_damage: u32,
    pub holy_heal: u32,
}

/// Status slots for one side of a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    /// Forces a full no-op on this side's next resolution, then clears.
    pub stunned: bool,
    pub poison: Option<StatusStack>,
    pub holy: Option<StatusStack>,
}

impl StatusLedger {
    /// Replace the poison stack. A zero amount leaves the slot untouched.
    pub fn apply_poison(&mut self, amount: u32, ticks: u8) {
        if amount > 0 && ticks > 0 {
            self.poison = Some(StatusStack::new(amount, ticks));
        }
    }

    /// Replace the holy stack. A zero amount leaves the slot untouched.
    pub fn apply_holy(&mut self, amount: u32, ticks: u8) {
        if amount > 0 && ticks > 0 {
            self.holy = Some(StatusStack::new(amount, ticks));
        }
    }

    /// Clear both poison and holy stacks.
    pub fn repair(&mut self) {
        self.poison = None;
        self.holy = None;
    }

    /// Read and clear the stun flag.
    pub fn take_stun(&mut self) -> bool {
        std::mem::take(&mut self.stunned)
    }

    /// Fire one tick from each stack, dropping stacks that run out.
    pub fn tick(&mut self) -> TickOutcome {
        TickOutcome {
            poison_damage: Self::tick_slot(&mut self.poison),
            holy_heal: Self::tick_slot(&mut self.holy),
        }
    }

    fn tick_slot(slot: &mut Option<StatusStack>) -> u32 {
        let Some(stack) = slot.as_mut() else {
            return 0;
        };
        let amount = stack.amount;
        stack.ticks_left = stack.ticks_left.saturating_sub(1);
        if stack.ticks_left == 0 {
            *slot = None;
        }
        amount
    }
}
