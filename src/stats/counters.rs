// src/stats/counters.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Snapshot of the manager's counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Work packages forwarded to the engine
    pub jobs_received: u64,
    /// Work packages dropped as re-announcements
    pub duplicate_jobs: u64,
    /// Solutions handed to the client
    pub solutions_submitted: u64,
    /// Solutions dropped because no connection was up
    pub solutions_discarded: u64,
    /// Solutions accepted by the pool
    pub accepted: u64,
    /// Solutions rejected by the pool
    pub rejected: u64,
    /// Accepted solutions flagged stale
    pub accepted_stale: u64,
    /// Rejected solutions flagged stale
    pub rejected_stale: u64,
    /// Hashrate reports sent
    pub hashrate_reports: u64,
    /// Endpoint rotations
    pub failovers: u64,
    /// Jobs whose boundary differed from the previous one
    pub difficulty_changes: u64,
    /// Round trip of the most recent accepted/rejected submission
    pub last_latency: Duration,
}

/// Thread-safe counters updated by the control loop and read by the host
#[derive(Debug, Default)]
pub struct ManagerStats {
    jobs_received: AtomicU64,
    duplicate_jobs: AtomicU64,
    solutions_submitted: AtomicU64,
    solutions_discarded: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
    accepted_stale: AtomicU64,
    rejected_stale: AtomicU64,
    hashrate_reports: AtomicU64,
    failovers: AtomicU64,
    difficulty_changes: AtomicU64,
    last_latency_us: AtomicU64,
}

impl ManagerStats {
    /// Creates zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn job_received(&self) {
        self.jobs_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn duplicate_job(&self) {
        self.duplicate_jobs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn solution_submitted(&self) {
        self.solutions_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn solution_discarded(&self) {
        self.solutions_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn solution_accepted(&self, stale: bool, latency: Duration) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        if stale {
            self.accepted_stale.fetch_add(1, Ordering::Relaxed);
        }
        self.record_latency(latency);
    }

    pub(crate) fn solution_rejected(&self, stale: bool, latency: Duration) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
        if stale {
            self.rejected_stale.fetch_add(1, Ordering::Relaxed);
        }
        self.record_latency(latency);
    }

    pub(crate) fn hashrate_reported(&self) {
        self.hashrate_reports.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failover(&self) {
        self.failovers.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn difficulty_changed(&self) {
        self.difficulty_changes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_latency(&self, latency: Duration) {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.last_latency_us.store(micros, Ordering::Relaxed);
    }

    /// Gets the current counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            jobs_received: self.jobs_received.load(Ordering::Relaxed),
            duplicate_jobs: self.duplicate_jobs.load(Ordering::Relaxed),
            solutions_submitted: self.solutions_submitted.load(Ordering::Relaxed),
            solutions_discarded: self.solutions_discarded.load(Ordering::Relaxed),
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            accepted_stale: self.accepted_stale.load(Ordering::Relaxed),
            rejected_stale: self.rejected_stale.load(Ordering::Relaxed),
            hashrate_reports: self.hashrate_reports.load(Ordering::Relaxed),
            failovers: self.failovers.load(Ordering::Relaxed),
            difficulty_changes: self.difficulty_changes.load(Ordering::Relaxed),
            last_latency: Duration::from_micros(self.last_latency_us.load(Ordering::Relaxed)),
        }
    }
}
