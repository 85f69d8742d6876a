//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play:
//! - Active battle sessions (one record per location key)
//! - Player progression (stats, chips, records, rewards)
//!
//! Static combat content (chips, entities) is handled by the catalog oracle,
//! not by repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::{InMemoryPlayerRepo, InMemorySessionRepo};
pub use traits::{PlayerRepository, SessionRepository};
pub use types::{ActiveTask, PlayerRecord, SESSION_RECORD_VERSION, SessionRecord, TaskGoal};
