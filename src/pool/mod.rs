// src/pool/mod.rs
//! Pool side of the manager
//!
//! Everything about which pool to talk to and what it sends:
//! - `Endpoint`: an immutable pool address, including the `exit` sentinel
//! - `EndpointSet`: ordered endpoints with attempt accounting and rotation
//! - `JobHistory`: filter for re-announced jobs
//! - `PoolClient`: the wire-protocol collaborator trait

/// Pool client collaborator trait
pub mod client;

/// Recently seen job identifiers
pub mod dedup;

/// Pool endpoint addresses
pub mod endpoint;

/// Failover rotation over configured endpoints
pub mod failover;

// Re-export main components for cleaner imports
pub use client::PoolClient;
pub use dedup::JobHistory;
pub use endpoint::Endpoint;
pub use failover::EndpointSet;
