// src/pool/endpoint.rs
//! Pool endpoint addresses
//!
//! An [`Endpoint`] is an immutable description of one remote pool: scheme,
//! host, port and optional credentials. The host `exit` is reserved as a
//! sentinel meaning "no more endpoints, stop trying"; it is never dialed.

use crate::utils::error::PoolError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Host name reserved for the failover sentinel
pub const EXIT_HOST: &str = "exit";

/// A remote work-providing pool address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: String,
    host: String,
    port: u16,
    user: Option<String>,
    password: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint without credentials
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Endpoint {
            scheme: scheme.into(),
            host: host.into(),
            port,
            user: None,
            password: None,
        }
    }

    /// Attaches login credentials to the endpoint
    pub fn with_credentials(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.user = Some(user.into());
        self.password = password;
        self
    }

    /// The failover sentinel
    pub fn exit() -> Self {
        Endpoint::new("", EXIT_HOST, 0)
    }

    /// Whether this is the failover sentinel
    pub fn is_exit(&self) -> bool {
        self.host == EXIT_HOST
    }

    /// URI scheme (e.g. `stratum+tcp`)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Pool host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Pool port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Login user, usually `wallet.worker`
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Login password
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exit() {
            write!(f, "{}", EXIT_HOST)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Parses `scheme://[user[:password]@]host:port`, or the bare word `exit`
impl FromStr for Endpoint {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(EXIT_HOST) {
            return Ok(Endpoint::exit());
        }

        let url = Url::parse(s)?;
        let host = url
            .host_str()
            .ok_or_else(|| PoolError::EndpointError(format!("Missing host in '{}'", s)))?;

        if host.eq_ignore_ascii_case(EXIT_HOST) {
            return Ok(Endpoint::exit());
        }

        let port = url
            .port_or_known_default()
            .ok_or_else(|| PoolError::EndpointError(format!("Missing port in '{}'", s)))?;

        let mut endpoint = Endpoint::new(url.scheme(), host, port);
        if !url.username().is_empty() {
            endpoint = endpoint.with_credentials(url.username(), url.password().map(String::from));
        }

        Ok(endpoint)
    }
}
