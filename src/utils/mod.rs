// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! Error handling and logging infrastructure shared by the whole crate.

/// Error types and handling utilities
///
/// Contains the [`PoolError`] enum which defines every error a host-facing
/// operation can return, along with conversion implementations.
pub mod error;

/// Logging configuration and utilities
pub mod logging;

// Re-export for easier access
pub use error::PoolError;
pub use logging::{init_logging, init_test_logging};
