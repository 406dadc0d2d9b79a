// src/cli/commands.rs
use crate::types::EngineMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pool Manager CLI - pool failover and work routing for a compute client
#[derive(Parser, Debug)]
#[command(name = "pool-manager")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (run a simulation or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the manager application
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Drive the manager against simulated pool and engine collaborators
    Simulate(SimulateOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for a simulated run
#[derive(Parser, Debug)]
pub struct SimulateOptions {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Engine mode (overrides config)
    #[arg(short, long)]
    pub mode: Option<EngineMode>,

    /// Connection attempts per endpoint (overrides config)
    #[arg(short = 'a', long)]
    pub max_attempts: Option<u32>,

    /// Seconds between simulated jobs
    #[arg(short, long, default_value_t = 5)]
    pub job_interval: u64,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}
