//! Unified error types surfaced by the runtime API.
//!
//! Wraps submission rejections, session invariant violations and repository
//! failures so clients can tell a player mistake from an infrastructure fault.

use thiserror::Error;

use battle_core::{BattleError, ErrorSeverity, PlayerId, Rejection, SessionError, SessionKey};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("a battle is already active for {0}")]
    SessionExists(SessionKey),

    #[error("player {0} has no registered combat stats")]
    UnknownPlayer(PlayerId),

    #[error("no entity named {0} in the catalog")]
    UnknownEntity(String),

    #[error("runtime requires a catalog to be configured before building")]
    MissingCatalog,

    #[error("invalid value {value:?} for {var}")]
    InvalidConfig { var: &'static str, value: String },

    #[error("timer worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Whether this is one of the closed submission rejection reasons.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RuntimeError::Rejected(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            RuntimeError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(reason) => reason.severity(),
            Self::Session(e) => e.severity(),
            Self::SessionExists(_) | Self::UnknownPlayer(_) | Self::UnknownEntity(_) => {
                ErrorSeverity::Validation
            }
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::MissingCatalog | Self::InvalidConfig { .. } | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected(reason) => reason.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Repository(_) => "repository",
            Self::SessionExists(_) => "session-exists",
            Self::UnknownPlayer(_) => "unknown-player",
            Self::UnknownEntity(_) => "unknown-entity",
            Self::MissingCatalog => "missing-catalog",
            Self::InvalidConfig { .. } => "invalid-config",
            Self::WorkerJoin(_) => "worker-join",
        }
    }
}
