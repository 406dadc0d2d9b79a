// src/manager/mod.rs
//! Pool manager
//!
//! Reconciles three independently timed sources of change into one view of
//! which endpoint is in use, whether it is healthy and whether the engine
//! runs against the right work:
//! - Client events (connected, disconnected, work, accepted, rejected)
//! - Engine events (solution found, restart requested)
//! - A self-paced control loop handling failover and hashrate reports

/// Event channel consumed by the control loop
pub mod events;

/// Host-facing manager handle
pub mod manager;

/// Control loop and event handlers
mod session;

// Re-export main components for cleaner imports
pub use events::{Event, EventReceiver, EventSender, channel};
pub use manager::{ManagerSettings, PoolManager};
