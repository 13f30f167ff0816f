//! rc-core: shared types, identifiers, errors, and configuration.
//!
//! This crate is the foundational dependency for the other rc-* crates. It
//! holds the asset descriptors exchanged between the catalog, the range
//! delivery service and the playback core, plus the unified error type and
//! the application configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::AssetId;
pub use media::*;
