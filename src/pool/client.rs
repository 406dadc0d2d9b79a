// src/pool/client.rs
//! Pool client collaborator interface
//!
//! The wire protocol (handshake, framing, authentication) lives behind
//! [`PoolClient`]. The manager only drives connection state and hands over
//! solutions and hashrate reports. Client events flow back through the
//! manager's [`EventSender`](crate::manager::EventSender).

use crate::miner::work::Solution;
use crate::pool::endpoint::Endpoint;

/// Connection to one pool endpoint at a time
///
/// Every method is called from the manager's control loop and must return
/// promptly; long-running work (dialing, I/O) belongs on the client's own
/// threads, reporting back through events.
pub trait PoolClient: Send + Sync {
    /// Starts connecting to `endpoint`
    ///
    /// The client should report the pending state until the attempt resolves,
    /// then publish `connected` or `disconnected`.
    fn connect(&self, endpoint: &Endpoint);

    /// Tears down the current connection
    fn disconnect(&self);

    /// Whether a session with the pool is established
    fn is_connected(&self) -> bool;

    /// Whether the client is between states (connecting or disconnecting)
    fn is_pending(&self) -> bool;

    /// Sends a candidate result to the pool
    fn submit_solution(&self, solution: &Solution);

    /// Reports the current hashrate as a `0x`-prefixed 64 digit hex string
    fn submit_hashrate(&self, rate: &str);

    /// Resolved address of the live connection, for log lines
    fn active_endpoint(&self) -> String {
        String::new()
    }
}
