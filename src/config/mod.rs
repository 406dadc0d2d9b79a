// src/config/mod.rs
//! Configuration management for the pool manager
//!
//! This module handles all configuration-related functionality including:
//! - Loading, parsing and validating configuration files
//! - Generating configuration templates
//! - Deriving the manager's runtime settings
//!
//! The configuration uses TOML format.

/// Core configuration implementation
///
/// Contains the [`Config`] struct that defines the configuration file layout.
pub mod config;

// Re-export key items for easy access
pub use config::Config;

use crate::utils::error::PoolError;
use std::path::PathBuf;

/// Loads manager configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(PoolError)` - If the file couldn't be read, parsed or validated
pub fn load(path: impl Into<PathBuf>) -> Result<Config, PoolError> {
    Config::load(path)
}

/// Generates a commented configuration template
pub fn generate_template() -> String {
    Config::generate_template()
}
