//! Queued actions and their interpretation.
//!
//! A side queues at most one [`QueuedAction`] per round. At resolution the
//! interpreter turns it into an [`Intent`], a normalized view of what the side
//! does this round, independent of how the action was phrased.

mod interpret;
mod validate;

pub use interpret::{ActionSource, ConsumedAction, Intent, interpret};
pub use validate::{ChipInventory, Submission, validate_submission};

/// An action waiting for resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueuedAction {
    /// Use one chip directly.
    Chip { name: String },
    /// Use `with`, boosted by the attack bonus of `support`.
    Supported { support: String, with: String },
    /// An autonomous entity's move, looked up in its own move list.
    Move { name: String },
}

impl QueuedAction {
    /// Names this action spends, in submission order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            QueuedAction::Chip { name } | QueuedAction::Move { name } => vec![name.as_str()],
            QueuedAction::Supported { support, with } => vec![support.as_str(), with.as_str()],
        }
    }
}
