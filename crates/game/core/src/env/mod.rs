//! Traits describing read-only inputs to the rules.
//!
//! The catalog oracle exposes chip and entity descriptors; the random source
//! supplies every roll. Neither is owned by the rules, so the runtime can back
//! them with loaded content and seeded generators.
mod catalog;
mod rng;

pub use catalog::{CatalogOracle, EntityTemplate};
pub use rng::{PcgRng, RandomSource, ScriptedRng};
