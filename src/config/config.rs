// src/config/config.rs
use crate::manager::ManagerSettings;
use crate::pool::endpoint::Endpoint;
use crate::types::EngineMode;
use crate::utils::error::PoolError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the pool manager
///
/// Lists the endpoints in failover order together with the engine mode and
/// the pacing of the control loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint URIs in failover order; `exit` ends the rotation
    pub endpoints: Vec<String>,

    /// Backends to run (opencl, cuda or mixed)
    #[serde(default)]
    pub engine_mode: EngineMode,

    /// Connection attempts per endpoint before failing over
    /// (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds between hashrate reports
    /// (default: 60)
    #[serde(default = "default_report_interval")]
    pub hashrate_report_interval: u64,

    /// Whether to send hashrate reports at all
    #[serde(default = "default_true")]
    pub report_hashrate: bool,

    /// Control loop period in milliseconds
    /// (default: 1000)
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Pause after stopping the engine before dialing the next endpoint
    /// (default: 3000)
    #[serde(default = "default_grace_millis")]
    pub failover_grace_millis: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_report_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_grace_millis() -> u64 {
    3000
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(PoolError)` - If the file couldn't be read, parsed or validated
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PoolError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            PoolError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&config_str)
    }

    /// Parses and validates configuration from a TOML string
    pub fn parse(config_str: &str) -> Result<Self, PoolError> {
        let config: Config = toml::from_str(config_str)
            .map_err(|e| PoolError::ConfigError(format!("Invalid config format: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and that every endpoint parses
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.max_attempts == 0 {
            return Err(PoolError::ConfigError(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.tick_millis == 0 {
            return Err(PoolError::ConfigError(
                "tick_millis must be greater than 0".into(),
            ));
        }
        if self.endpoints.is_empty() {
            return Err(PoolError::ConfigError("No endpoints configured".into()));
        }
        self.parsed_endpoints().map(|_| ())
    }

    /// Endpoints in failover order
    pub fn parsed_endpoints(&self) -> Result<Vec<Endpoint>, PoolError> {
        self.endpoints.iter().map(|uri| uri.parse()).collect()
    }

    /// Runtime settings for the manager
    pub fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings {
            max_attempts: self.max_attempts,
            engine_mode: self.engine_mode,
            report_hashrate: self.report_hashrate,
            report_interval: Duration::from_secs(self.hashrate_report_interval),
            tick: Duration::from_millis(self.tick_millis),
            failover_grace: Duration::from_millis(self.failover_grace_millis),
        }
    }

    /// Generates a configuration template string
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# Pool Manager Configuration\n\n");
        template.push_str("# Endpoints in failover order. `exit` stops the manager once every\n");
        template.push_str("# endpoint before it has failed; without it the rotation wraps around.\n");
        template.push_str("endpoints = [\n");
        template.push_str("    \"stratum+tcp://0xWALLET.worker01:x@eu1.pool.example:4444\",\n");
        template.push_str("    \"stratum+tcp://0xWALLET.worker01:x@us1.pool.example:4444\",\n");
        template.push_str("    \"exit\",\n");
        template.push_str("]\n\n");
        template.push_str("# Supported engine modes: opencl, cuda, mixed\n");
        template.push_str("engine_mode = \"opencl\"\n");
        template.push_str("# Connection attempts per endpoint before failing over\n");
        template.push_str("max_attempts = 3\n");
        template.push_str("# Seconds between hashrate reports\n");
        template.push_str("hashrate_report_interval = 60\n");
        template.push_str("report_hashrate = true\n");
        template.push_str("# Control loop period and failover grace, in milliseconds\n");
        template.push_str("tick_millis = 1000\n");
        template.push_str("failover_grace_millis = 3000\n");

        template
    }
}
