//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML files that describe combat
//! content:
//! - Chip catalog (data-driven via RON)
//! - Autonomous entity catalog (data-driven via RON)
//! - Battle rules configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime catalog oracle and never appears in
//! session state; encounters snapshot what they need when they start.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ChipLoader, ConfigLoader, ContentBundle, ContentFactory, EntityLoader};
