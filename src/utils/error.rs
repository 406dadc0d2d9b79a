// src/utils/error.rs
use crate::manager::events::Event;
use std::io;
use thiserror::Error;

/// Main error type for the pool manager
///
/// Only host-facing operations surface these: configuration loading,
/// endpoint parsing and starting the manager. Failures inside the control
/// loop are logged and resolved into a retry, a failover or a shutdown.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Endpoint string could not be turned into a dialable endpoint
    #[error("Invalid endpoint: {0}")]
    EndpointError(String),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Compute engine failed to start a backend
    #[error("Engine error: {0}")]
    EngineError(String),

    /// The manager was started without any endpoint to dial
    #[error("Manager has no endpoints defined")]
    NoEndpoints,

    /// Thread communication channel errors
    #[error("Thread communication error: {0}")]
    ChannelError(String),
}

/// Converts crossbeam channel send errors for manager events into PoolError
///
/// Only happens once the control loop has gone away and dropped its receiver.
impl From<crossbeam_channel::SendError<Event>> for PoolError {
    fn from(e: crossbeam_channel::SendError<Event>) -> Self {
        PoolError::ChannelError(format!("Event send failed: {}", e))
    }
}
