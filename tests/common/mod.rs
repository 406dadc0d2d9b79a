// tests/common/mod.rs
//! Recording collaborators for driving a real `PoolManager` in tests

#![allow(dead_code)]

use pool_manager_rs::manager::{self, EventSender};
use pool_manager_rs::{
    Backend, Endpoint, Engine, ManagerSettings, PoolClient, PoolError, PoolManager, Solution,
    WorkPackage,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Client whose connection state is set by the test
#[derive(Default)]
pub struct RecordingClient {
    pub connected: AtomicBool,
    pub pending: AtomicBool,
    pub dialed: Mutex<Vec<String>>,
    pub solutions: Mutex<Vec<Solution>>,
    pub hashrates: Mutex<Vec<String>>,
    /// Control loop ticks seen when each hashrate report arrived
    pub report_ticks: Mutex<Vec<u64>>,
    /// State polls, one per control loop tick
    pub polls: AtomicU64,
    pub disconnects: AtomicU64,
}

impl RecordingClient {
    pub fn dialed(&self) -> Vec<String> {
        self.dialed.lock().unwrap().clone()
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl PoolClient for RecordingClient {
    fn connect(&self, endpoint: &Endpoint) {
        self.dialed.lock().unwrap().push(endpoint.host().to_string());
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn is_pending(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.pending.load(Ordering::SeqCst)
    }

    fn submit_solution(&self, solution: &Solution) {
        self.solutions.lock().unwrap().push(solution.clone());
    }

    fn submit_hashrate(&self, rate: &str) {
        self.hashrates.lock().unwrap().push(rate.to_string());
        self.report_ticks
            .lock()
            .unwrap()
            .push(self.polls.load(Ordering::SeqCst));
    }
}

/// Engine that records every call
#[derive(Default)]
pub struct RecordingEngine {
    pub running: AtomicBool,
    pub rate: AtomicU64,
    pub starts: Mutex<Vec<(Backend, bool)>>,
    pub stops: AtomicU64,
    pub work: Mutex<Vec<WorkPackage>>,
    pub accepted: Mutex<Vec<bool>>,
    pub rejected: Mutex<Vec<bool>>,
    pub pool_addresses: Mutex<Vec<(String, u16)>>,
}

impl RecordingEngine {
    pub fn work_count(&self) -> usize {
        self.work.lock().unwrap().len()
    }

    pub fn starts(&self) -> Vec<(Backend, bool)> {
        self.starts.lock().unwrap().clone()
    }
}

impl Engine for RecordingEngine {
    fn start(&self, backend: Backend, combined: bool) -> Result<(), PoolError> {
        self.starts.lock().unwrap().push((backend, combined));
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn current_rate(&self) -> u64 {
        self.rate.load(Ordering::SeqCst)
    }

    fn set_work(&self, work: &WorkPackage) {
        self.work.lock().unwrap().push(work.clone());
    }

    fn accepted_solution(&self, stale: bool) {
        self.accepted.lock().unwrap().push(stale);
    }

    fn rejected_solution(&self, stale: bool) {
        self.rejected.lock().unwrap().push(stale);
    }

    fn set_pool_address(&self, host: &str, port: u16) {
        self.pool_addresses
            .lock()
            .unwrap()
            .push((host.to_string(), port));
    }
}

pub struct Harness {
    pub manager: PoolManager,
    pub client: Arc<RecordingClient>,
    pub engine: Arc<RecordingEngine>,
    pub events: EventSender,
}

/// Settings with a millisecond tick and no failover grace
pub fn fast_settings(max_attempts: u32) -> ManagerSettings {
    ManagerSettings {
        max_attempts,
        report_hashrate: false,
        tick: Duration::from_millis(5),
        failover_grace: Duration::ZERO,
        ..ManagerSettings::default()
    }
}

pub fn harness(settings: ManagerSettings, hosts: &[&str]) -> Harness {
    pool_manager_rs::utils::init_test_logging();

    let (events, inbox) = manager::channel();
    let client = Arc::new(RecordingClient::default());
    let engine = Arc::new(RecordingEngine::default());
    let manager = PoolManager::new(client.clone(), engine.clone(), settings, inbox);
    for host in hosts {
        let endpoint = if *host == "exit" {
            Endpoint::exit()
        } else {
            Endpoint::new("stratum+tcp", *host, 4444)
        };
        manager.add_endpoint(endpoint);
    }

    Harness {
        manager,
        client,
        engine,
        events,
    }
}

/// Polls `condition` until it holds or two seconds pass
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    condition()
}

pub fn header(n: u8) -> [u8; 32] {
    [n; 32]
}
