//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod read_session;
mod simulate;

pub use read_session::ReadSession;
pub use simulate::Simulate;
