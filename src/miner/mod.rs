// src/miner/mod.rs
//! Compute engine boundary
//!
//! This module defines what the manager needs from a compute engine and the
//! data that crosses that boundary:
//! - The [`Engine`] collaborator trait
//! - Work packages issued by pools
//! - Candidate solutions found by the engine

/// Compute engine collaborator trait
pub mod engine;

/// Work packages, job identifiers and solutions
pub mod work;

// Re-export main components for cleaner imports
pub use self::engine::Engine;
pub use self::work::{JobId, Solution, U256, WorkPackage};
