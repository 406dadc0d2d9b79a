// src/pool/dedup.rs
//! Recent job history
//!
//! Pools sometimes re-announce unchanged work. Forwarding those to the
//! engine would restart computation for nothing, so the last few job
//! identifiers are remembered and repeats are dropped.

use crate::miner::work::JobId;
use std::collections::VecDeque;

/// Number of job identifiers remembered
pub const JOB_HISTORY_LEN: usize = 4;

/// FIFO of recently seen job identifiers
#[derive(Debug, Clone, Default)]
pub struct JobHistory {
    recent: VecDeque<JobId>,
}

impl JobHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        JobHistory {
            recent: VecDeque::with_capacity(JOB_HISTORY_LEN + 1),
        }
    }

    /// Whether `job` is among the remembered identifiers
    pub fn seen(&self, job: &JobId) -> bool {
        self.recent.contains(job)
    }

    /// Remembers `job`, evicting the oldest entries beyond capacity
    pub fn record(&mut self, job: JobId) {
        self.recent.push_back(job);
        while self.recent.len() > JOB_HISTORY_LEN {
            self.recent.pop_front();
        }
    }

    /// Membership test, then insertion on a miss
    ///
    /// Returns `true` if the job is new.
    pub fn check_and_record(&mut self, job: JobId) -> bool {
        if self.seen(&job) {
            return false;
        }
        self.record(job);
        true
    }

    /// Number of remembered identifiers
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}
