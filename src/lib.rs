//! Pool Manager - pool connection orchestration for a distributed compute client
//!
//! This crate owns the lifecycle of a connection to one of several mining pool
//! endpoints:
//! - Failover between endpoints after repeated connection failures
//! - Routing of pool work to a compute engine, with duplicate job filtering
//! - Timing and logging of solution submissions
//! - Periodic hashrate reports to the active pool
//!
//! The pool wire protocol and the compute engine are collaborators behind the
//! [`PoolClient`] and [`Engine`] traits.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Pool manager orchestration and control loop
pub mod manager;

/// Compute engine boundary and work types
pub mod miner;

/// Pool endpoints, failover and job deduplication
pub mod pool;

/// Difficulty display, hashrate encoding and counters
pub mod stats;

/// Simulated collaborators
pub mod sim;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use manager::{EventSender, ManagerSettings, PoolManager};
pub use miner::{Engine, JobId, Solution, U256, WorkPackage};
pub use pool::{Endpoint, EndpointSet, JobHistory, PoolClient};
pub use stats::{StatsSnapshot, difficulty_to_display, encode_hashrate};
pub use types::{Backend, EngineMode};
pub use utils::{PoolError, init_logging};
