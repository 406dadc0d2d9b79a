// src/sim/mod.rs
//! Simulated collaborators
//!
//! Stand-ins for a real pool protocol client and compute engine, used by the
//! `simulate` command to exercise failover and work routing end to end.

/// TCP probing client that invents work
pub mod client;

/// Engine that reports a fixed rate
pub mod engine;

pub use client::SimulatedClient;
pub use engine::SimulatedEngine;
