// src/sim/engine.rs
//! Simulated compute engine
//!
//! Reports a fixed rate per running backend and "finds" a solution for every
//! other job it is handed.

use crate::manager::EventSender;
use crate::miner::engine::Engine;
use crate::miner::work::{Solution, WorkPackage};
use crate::types::Backend;
use crate::utils::error::PoolError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Simulated rate of one backend, in hashes per second
pub const BACKEND_RATE: u64 = 25_000_000;

/// Engine that computes nothing
pub struct SimulatedEngine {
    events: EventSender,
    backends: Mutex<Vec<Backend>>,
    jobs: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl SimulatedEngine {
    /// Creates a stopped engine
    pub fn new(events: EventSender) -> Self {
        SimulatedEngine {
            events,
            backends: Mutex::new(Vec::new()),
            jobs: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    fn backends(&self) -> MutexGuard<'_, Vec<Backend>> {
        self.backends.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accepted and rejected solutions so far
    pub fn solution_counts(&self) -> (u64, u64) {
        (
            self.accepted.load(Ordering::Relaxed),
            self.rejected.load(Ordering::Relaxed),
        )
    }
}

impl Engine for SimulatedEngine {
    fn start(&self, backend: Backend, combined: bool) -> Result<(), PoolError> {
        let mut backends = self.backends();
        if backends.contains(&backend) {
            return Err(PoolError::EngineError(format!(
                "{} backend already running",
                backend
            )));
        }
        log::info!(
            "Starting {} backend{}",
            backend,
            if combined { " alongside others" } else { "" }
        );
        backends.push(backend);
        Ok(())
    }

    fn stop(&self) {
        self.backends().clear();
    }

    fn is_running(&self) -> bool {
        !self.backends().is_empty()
    }

    fn current_rate(&self) -> u64 {
        BACKEND_RATE * self.backends().len() as u64
    }

    fn set_work(&self, work: &WorkPackage) {
        let serial = self.jobs.fetch_add(1, Ordering::Relaxed) + 1;
        if serial % 2 == 0 && self.is_running() {
            self.events.solution_found(Solution {
                nonce: serial.wrapping_mul(0x9e37_79b9_7f4a_7c15),
                header: work.header,
                stale: false,
            });
        }
    }

    fn accepted_solution(&self, _stale: bool) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    fn rejected_solution(&self, _stale: bool) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn set_pool_address(&self, host: &str, port: u16) {
        log::debug!("Engine now working for {}:{}", host, port);
    }
}
