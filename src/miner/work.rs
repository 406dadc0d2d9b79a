// src/miner/work.rs
//! Work units and candidate results exchanged between pool and engine

use std::fmt;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer used for acceptance boundaries
    pub struct U256(4);
}

/// Opaque job identifier (the work header hash)
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct JobId([u8; 32]);

impl JobId {
    /// First bytes of the identifier as hex, for log lines
    pub fn abridged(&self) -> String {
        format!("#{}", hex::encode(&self.0[..4]))
    }
}

impl From<[u8; 32]> for JobId {
    fn from(bytes: [u8; 32]) -> Self {
        JobId(bytes)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.abridged())
    }
}

/// A unit of work issued by a pool endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPackage {
    /// Job identifier
    pub header: JobId,
    /// A candidate is valid when its result is below this threshold
    pub boundary: U256,
    /// Engine specific data (seed, epoch, extranonce...)
    pub payload: Vec<u8>,
}

impl WorkPackage {
    /// Creates a work package with an empty payload
    pub fn new(header: impl Into<JobId>, boundary: U256) -> Self {
        WorkPackage {
            header: header.into(),
            boundary,
            payload: Vec::new(),
        }
    }
}

/// Candidate result found by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Nonce that satisfies the boundary
    pub nonce: u64,
    /// Job the nonce was computed for
    pub header: JobId,
    /// The job was no longer current when the nonce was found
    pub stale: bool,
}
