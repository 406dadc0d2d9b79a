// src/manager/manager.rs
use crate::manager::events::{Event, EventReceiver, EventSender};
use crate::manager::session::Session;
use crate::miner::engine::Engine;
use crate::pool::client::PoolClient;
use crate::pool::endpoint::Endpoint;
use crate::pool::failover::EndpointSet;
use crate::stats::counters::{ManagerStats, StatsSnapshot};
use crate::types::EngineMode;
use crate::utils::error::PoolError;
use arc_swap::ArcSwapOption;
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Runtime knobs of the pool manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSettings {
    /// Connection attempts per endpoint before rotating
    pub max_attempts: u32,
    /// Backends started when a connection comes up
    pub engine_mode: EngineMode,
    /// Whether hashrate reports are sent at all
    pub report_hashrate: bool,
    /// Pause between hashrate reports
    pub report_interval: Duration,
    /// Control loop period
    pub tick: Duration,
    /// Pause after stopping the engine before dialing another endpoint
    pub failover_grace: Duration,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        ManagerSettings {
            max_attempts: 3,
            engine_mode: EngineMode::default(),
            report_hashrate: true,
            report_interval: Duration::from_secs(60),
            tick: Duration::from_secs(1),
            failover_grace: Duration::from_secs(3),
        }
    }
}

/// State shared between the host-facing handle and the control loop
pub(crate) struct Shared {
    pub(crate) client: Arc<dyn PoolClient>,
    pub(crate) engine: Arc<dyn Engine>,
    pub(crate) settings: ManagerSettings,
    pub(crate) endpoints: Mutex<EndpointSet>,
    pub(crate) active: ArcSwapOption<Endpoint>,
    pub(crate) running: AtomicBool,
    pub(crate) stats: ManagerStats,
}

impl Shared {
    pub(crate) fn endpoints(&self) -> MutexGuard<'_, EndpointSet> {
        self.endpoints.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Orchestrates the connection to one of several pool endpoints
///
/// Owns endpoint selection and failover, routes work from the client to the
/// engine, filters re-announced jobs, times solution submissions and reports
/// the hashrate back to the pool. Collaborators publish what happens on their
/// side through [`PoolManager::event_sender`]; a background control loop
/// consumes those events and polls connection health once per tick.
pub struct PoolManager {
    shared: Arc<Shared>,
    events_tx: Sender<Event>,
    events_rx: Receiver<Event>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PoolManager {
    /// Creates a stopped manager without endpoints
    ///
    /// # Arguments
    /// * `client` - Pool protocol collaborator
    /// * `engine` - Compute engine collaborator
    /// * `settings` - Failover, reporting and pacing settings
    /// * `events` - Receiving side of [`channel`](crate::manager::channel); the
    ///   sending side belongs to the collaborators
    pub fn new(
        client: Arc<dyn PoolClient>,
        engine: Arc<dyn Engine>,
        settings: ManagerSettings,
        events: EventReceiver,
    ) -> Self {
        let EventReceiver {
            tx: events_tx,
            rx: events_rx,
        } = events;
        PoolManager {
            shared: Arc::new(Shared {
                client,
                engine,
                endpoints: Mutex::new(EndpointSet::new(settings.max_attempts)),
                settings,
                active: ArcSwapOption::empty(),
                running: AtomicBool::new(false),
                stats: ManagerStats::new(),
            }),
            events_tx,
            events_rx,
            worker: Mutex::new(None),
        }
    }

    /// Handle for the client and engine to publish their events
    pub fn event_sender(&self) -> EventSender {
        EventSender::new(self.events_tx.clone())
    }

    /// Appends an endpoint at the lowest failover priority
    pub fn add_endpoint(&self, endpoint: Endpoint) {
        log::debug!("Adding endpoint {}", endpoint);
        self.shared.endpoints().push(endpoint);
    }

    /// Forgets every endpoint and drops the current connection
    pub fn clear_endpoints(&self) {
        self.shared.endpoints().clear();
        self.shared.active.store(None);
        self.shared.engine.set_pool_address("", 0);
        if self.shared.client.is_connected() {
            self.shared.client.disconnect();
        }
    }

    /// Starts the control loop
    ///
    /// Does nothing if the loop is already running.
    ///
    /// # Errors
    /// Returns `PoolError` if:
    /// - No endpoint has been added
    /// - The control loop thread cannot be spawned
    pub fn start(&self) -> Result<(), PoolError> {
        // Held for the whole call so concurrent starts cannot both pass the check.
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        if self.shared.is_running() {
            log::debug!("Manager already running");
            return Ok(());
        }
        if self.shared.endpoints().is_empty() {
            log::warn!("Manager has no connections defined!");
            return Err(PoolError::NoEndpoints);
        }

        if let Some(previous) = worker.take() {
            // Loop already gave up on its own; reap it before starting over.
            let _ = previous.join();
        }

        // Events published while stopped belong to the previous session.
        let stale = self.events_rx.try_iter().count();
        if stale > 0 {
            log::debug!("Dropped {} events left over from the previous session", stale);
        }

        self.shared.running.store(true, Ordering::Relaxed);
        let session = Session::new(Arc::clone(&self.shared));
        let events = self.events_rx.clone();
        let spawned = thread::Builder::new()
            .name("pool-manager".into())
            .spawn(move || session.run(events));

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.running.store(false, Ordering::Relaxed);
                Err(e.into())
            }
        }
    }

    /// Stops the control loop, then disconnects the client and stops the engine
    ///
    /// Returns once the control loop has exited.
    pub fn stop(&self) {
        let was_running = self.shared.running.swap(false, Ordering::Relaxed);
        if was_running {
            log::info!("Shutting down...");
            let _ = self.events_tx.send(Event::Wake);
        }

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                log::error!("Control loop panicked");
            }
        }

        if was_running {
            if self.shared.client.is_connected() {
                self.shared.client.disconnect();
            }
            if self.shared.engine.is_running() {
                log::info!("Shutting down miners...");
                self.shared.engine.stop();
            }
        }
    }

    /// Whether the control loop is running
    ///
    /// Turns false on its own once failover reaches the `exit` sentinel.
    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// Endpoint most recently selected by the control loop
    pub fn active_endpoint(&self) -> Option<Arc<Endpoint>> {
        self.shared.active.load_full()
    }

    /// Current counters
    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Number of configured endpoints, sentinel included
    pub fn endpoint_count(&self) -> usize {
        self.shared.endpoints().len()
    }
}

impl Drop for PoolManager {
    fn drop(&mut self) {
        self.stop();
    }
}
