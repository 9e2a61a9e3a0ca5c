//! Configuration module.
//!
//! This module provides the checker options and the loading of blacklist
//! server lists from files, command-line arguments or built-in defaults.

pub mod defaults;
pub mod loader;
pub mod settings;

pub use loader::{BlacklistList, ConfigLoader};
pub use settings::CheckerConfig;
