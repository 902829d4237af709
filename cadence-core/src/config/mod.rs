//! Gait setup configuration
//!
//! Serializable description of the initial schedules. Setups are read from
//! TOML text and can be persisted as postcard binary data.

#[cfg(feature = "serde")]
pub mod loader;
pub mod types;

pub use types::*;
