// src/main.rs
use clap::Parser;
use pool_manager_rs::sim::{SimulatedClient, SimulatedEngine};
use pool_manager_rs::{self, *};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Main entry point for the pool manager
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), PoolError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Simulate(opts) => run_simulation(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Runs the manager against simulated collaborators
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads and validates configuration, applies CLI overrides
/// 3. Wires the simulated client and engine to a fresh manager
/// 4. Runs until failover is exhausted or Ctrl-C is pressed
fn run_simulation(opts: cli::SimulateOptions) -> Result<(), PoolError> {
    utils::init_logging();

    let mut config = config::load(&opts.config)?;
    // Apply CLI overrides
    if let Some(mode) = opts.mode {
        config.engine_mode = mode;
    }
    if let Some(attempts) = opts.max_attempts {
        config.max_attempts = attempts;
    }
    config.validate()?;

    let (events, inbox) = manager::channel();
    let client = Arc::new(SimulatedClient::new(
        events.clone(),
        Duration::from_secs(opts.job_interval.max(1)),
    ));
    let engine = Arc::new(SimulatedEngine::new(events));
    let manager = PoolManager::new(client, engine.clone(), config.manager_settings(), inbox);
    for endpoint in config.parsed_endpoints()? {
        manager.add_endpoint(endpoint);
    }

    log::info!(
        "Starting pool manager with {} endpoint(s), engine mode {}",
        manager.endpoint_count(),
        config.engine_mode
    );
    manager.start()?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut poll = tokio::time::interval(Duration::from_millis(500));
        loop {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    log::info!("Interrupted");
                    break;
                }
                _ = poll.tick() => {
                    if !manager.is_running() {
                        break;
                    }
                }
            }
        }
        Ok::<(), PoolError>(())
    })?;

    manager.stop();

    let stats = manager.stats();
    let (accepted, rejected) = engine.solution_counts();
    log::info!(
        "Jobs: {} ({} duplicates) | Solutions: {} submitted, {} discarded | Accepted/Rejected: {}/{} | Failovers: {}",
        stats.jobs_received,
        stats.duplicate_jobs,
        stats.solutions_submitted,
        stats.solutions_discarded,
        accepted,
        rejected,
        stats.failovers
    );

    Ok(())
}

/// Generates configuration template file
///
/// # Arguments
/// * `opts` - Configuration generation options
fn generate_config(opts: cli::ConfigOptions) -> Result<(), PoolError> {
    let config = config::generate_template();
    std::fs::write(opts.output, config)?;
    Ok(())
}
