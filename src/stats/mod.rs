//! Statistics and reporting helpers
//!
//! This module provides:
//! - Difficulty display for pool boundaries
//! - Hashrate encoding for pool reports
//! - Atomic counters describing what the manager has done so far
//!

/// Manager counters
///
/// Atomic collection of job, solution and failover counts, readable from
/// any thread through [`ManagerStats::snapshot`].
pub mod counters;

/// Boundary to difficulty conversion and display
pub mod difficulty;

/// Hashrate report encoding
pub mod hashrate;

// Re-export main components
pub use counters::{ManagerStats, StatsSnapshot};
pub use difficulty::{U512, difficulty_to_display};
pub use hashrate::encode_hashrate;
