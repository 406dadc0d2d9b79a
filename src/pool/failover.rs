// src/pool/failover.rs
//! Endpoint failover set
//!
//! Ordered endpoints (insertion order is failover priority), the index of
//! the active one and how many connection attempts it has consumed.

use crate::pool::endpoint::Endpoint;

/// Ordered collection of candidate endpoints with rotation and attempt accounting
///
/// Invariants: the active index is valid whenever the set is non-empty, and
/// the attempt counter is zero right after every rotation.
#[derive(Debug, Clone)]
pub struct EndpointSet {
    endpoints: Vec<Endpoint>,
    active: usize,
    attempts: u32,
    max_attempts: u32,
}

impl EndpointSet {
    /// Creates an empty set
    ///
    /// # Arguments
    /// * `max_attempts` - Connection attempts per endpoint before rotating (clamped to at least 1)
    pub fn new(max_attempts: u32) -> Self {
        EndpointSet {
            endpoints: Vec::new(),
            active: 0,
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Appends an endpoint at the lowest priority
    pub fn push(&mut self, endpoint: Endpoint) {
        self.endpoints.push(endpoint);
    }

    /// Removes every endpoint and resets the rotation state
    pub fn clear(&mut self) {
        self.endpoints.clear();
        self.active = 0;
        self.attempts = 0;
    }

    /// Number of configured endpoints, sentinel included
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether no endpoint is configured
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Currently active endpoint, `None` when the set is empty
    pub fn current(&self) -> Option<&Endpoint> {
        self.endpoints.get(self.active)
    }

    /// Index of the active endpoint
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Attempts consumed on the active endpoint
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Configured attempts per endpoint
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Counts one connection attempt against the active endpoint
    ///
    /// Returns `true` when this attempt is the last one allowed before rotation.
    pub fn record_attempt(&mut self) -> bool {
        self.attempts = self.attempts.saturating_add(1);
        self.is_exhausted()
    }

    /// Whether the active endpoint has used up its attempts
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Forgets the attempts made on the active endpoint
    pub fn reset_attempts(&mut self) {
        self.attempts = 0;
    }

    /// Advances to the next endpoint, wrapping after the last one
    ///
    /// Returns the newly active endpoint, `None` when the set is empty.
    pub fn rotate(&mut self) -> Option<&Endpoint> {
        self.attempts = 0;
        if self.endpoints.is_empty() {
            self.active = 0;
            return None;
        }
        self.active = (self.active + 1) % self.endpoints.len();
        self.endpoints.get(self.active)
    }
}
