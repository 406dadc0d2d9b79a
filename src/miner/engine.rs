// src/miner/engine.rs
//! Compute engine collaborator interface
//!
//! Device enumeration, kernels and per-device accounting live behind
//! [`Engine`]. Found solutions and restart requests flow back through the
//! manager's [`EventSender`](crate::manager::EventSender).

use crate::miner::work::WorkPackage;
use crate::types::Backend;
use crate::utils::error::PoolError;

/// Compute engine running one or more backends
pub trait Engine: Send + Sync {
    /// Spins up `backend`
    ///
    /// # Arguments
    /// * `backend` - Backend to start
    /// * `combined` - Another backend is already running alongside this one
    fn start(&self, backend: Backend, combined: bool) -> Result<(), PoolError>;

    /// Stops every running backend
    fn stop(&self);

    /// Whether any backend is running
    fn is_running(&self) -> bool;

    /// Aggregate hashrate in hashes per second
    fn current_rate(&self) -> u64;

    /// Replaces the work every backend computes against
    fn set_work(&self, work: &WorkPackage);

    /// Statistics hook for an accepted solution
    fn accepted_solution(&self, stale: bool);

    /// Statistics hook for a rejected solution
    fn rejected_solution(&self, stale: bool);

    /// Informs the engine which pool it is working for; `("", 0)` clears it
    fn set_pool_address(&self, _host: &str, _port: u16) {}
}
