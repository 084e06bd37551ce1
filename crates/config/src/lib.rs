//! `trellis-config` — column catalog configuration.
//!
//! Provides the static descriptor seed list and the TOML override format
//! used to replace it per deployment.

pub mod catalog;

pub use catalog::{default_catalog, load_or_default, CatalogError, CatalogFile};
