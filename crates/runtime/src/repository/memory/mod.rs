mod player;
mod session;

pub use player::InMemoryPlayerRepo;
pub use session::InMemorySessionRepo;
