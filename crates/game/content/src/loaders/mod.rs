//! Content loaders for reading combat data from files.
//!
//! Every loader exposes `load(path)` for files on disk and `parse(text)` for
//! content already in memory. Both return `anyhow` errors carrying the file or
//! entry that failed.

pub mod chips;
pub mod config;
pub mod entities;
pub mod factory;

pub use chips::ChipLoader;
pub use config::ConfigLoader;
pub use entities::EntityLoader;
pub use factory::{ContentBundle, ContentFactory};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
