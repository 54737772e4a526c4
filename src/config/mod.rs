//! Configuration module for PassWall
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - Settings persistence (key-derivation parameters, directories, limits)

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
