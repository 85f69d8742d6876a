//! Common error infrastructure for battle-core.
//!
//! # Design Principles
//!
//! - **Type Safety**: submission rejections and session-shape violations are
//!   separate closed enums
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: every variant has a kebab-case code for callers and logs

use crate::state::SideId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, rejected without mutating anything.
    ///
    /// Examples: unknown chip, cap reached, action already queued
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    ///
    /// Examples: persisted HP above max, poison stack with zero ticks
    Internal,

    /// Unrecoverable; the session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Reasons a submitted action or forfeit is turned away.
///
/// Rejections never mutate the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("unknown or unusable action")]
    InvalidAction,

    #[error("action is not owned in sufficient quantity")]
    NotOwned,

    #[error("action reached its per-battle usage cap")]
    CapExceeded,

    #[error("special action was already used this battle")]
    SpecialAlreadyUsed,

    #[error("an action is already queued for this round")]
    AlreadyQueued,

    #[error("stunned combatants cannot act this round")]
    Stunned,

    #[error("actor is not a participant in this battle")]
    NotParticipant,

    #[error("no battle is active for this key")]
    NoSession,
}

impl BattleError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction => "invalid-action",
            Self::NotOwned => "not-owned",
            Self::CapExceeded => "cap-exceeded",
            Self::SpecialAlreadyUsed => "special-already-used",
            Self::AlreadyQueued => "already-queued",
            Self::Stunned => "stunned",
            Self::NotParticipant => "not-participant",
            Self::NoSession => "no-session",
        }
    }
}

/// Violations of the session invariants, detected on construction or when a
/// persisted record is read back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{side:?} hp {hp} outside [0, {max_hp}]")]
    HpOutOfRange { side: SideId, hp: u32, max_hp: u32 },

    #[error("{side:?} has a non-positive max hp")]
    ZeroMaxHp { side: SideId },

    #[error("{side:?} {stat} {value} is not a percentage")]
    InvalidOdds {
        side: SideId,
        stat: &'static str,
        value: u8,
    },

    #[error("{side:?} {slot} stack out of bounds (amount {amount}, ticks {ticks_left})")]
    InvalidStack {
        side: SideId,
        slot: &'static str,
        amount: u32,
        ticks_left: u8,
    },

    #[error("session shape does not match a duel or an encounter")]
    ShapeMismatch,

    #[error("a player cannot fight themself")]
    SelfDuel,

    #[error("entity {name} carries {count} moves (max {max})")]
    TooManyMoves {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("entity {name} has no moves")]
    NoMoves { name: String },
}

impl BattleError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SelfDuel | Self::TooManyMoves { .. } | Self::NoMoves { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HpOutOfRange { .. } => "hp-out-of-range",
            Self::ZeroMaxHp { .. } => "zero-max-hp",
            Self::InvalidOdds { .. } => "invalid-odds",
            Self::InvalidStack { .. } => "invalid-stack",
            Self::ShapeMismatch => "shape-mismatch",
            Self::SelfDuel => "self-duel",
            Self::TooManyMoves { .. } => "too-many-moves",
            Self::NoMoves { .. } => "no-moves",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_codes_are_kebab_case() {
        assert_eq!(Rejection::CapExceeded.error_code(), "cap-exceeded");
        assert_eq!(
            Rejection::SpecialAlreadyUsed.error_code(),
            "special-already-used"
        );
        assert_eq!(Rejection::NoSession.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn corrupted_state_is_internal() {
        let err = SessionError::HpOutOfRange {
            side: SideId::Challenger,
            hp: 120,
            max_hp: 100,
        };
        assert!(err.severity().is_internal());
    }
}
