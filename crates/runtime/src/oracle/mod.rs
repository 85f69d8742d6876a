//! Oracle adapters that expose static catalog content to the rules.

mod catalog;

pub use catalog::CatalogOracleImpl;
