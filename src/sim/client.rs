// src/sim/client.rs
//! Simulated pool client
//!
//! Dials endpoints with a plain TCP reachability probe and, once reachable,
//! feeds synthetic jobs. Every third announcement repeats the previous job
//! the way some pools re-announce unchanged work.

use crate::manager::EventSender;
use crate::miner::work::{JobId, Solution, U256, WorkPackage};
use crate::pool::client::PoolClient;
use crate::pool::endpoint::Endpoint;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const SUBMIT_ROUND_TRIP: Duration = Duration::from_millis(60);

#[derive(Default)]
struct Link {
    connected: AtomicBool,
    pending: AtomicBool,
    generation: AtomicU64,
    remote: Mutex<Option<SocketAddr>>,
}

/// Pool client that only checks reachability and invents work
pub struct SimulatedClient {
    events: EventSender,
    link: Arc<Link>,
    job_interval: Duration,
}

impl SimulatedClient {
    /// Creates a disconnected client
    ///
    /// # Arguments
    /// * `events` - Manager event handle
    /// * `job_interval` - Pause between synthetic job announcements
    pub fn new(events: EventSender, job_interval: Duration) -> Self {
        SimulatedClient {
            events,
            link: Arc::new(Link::default()),
            job_interval,
        }
    }

    fn probe(endpoint: &Endpoint) -> Option<SocketAddr> {
        let addrs = (endpoint.host(), endpoint.port()).to_socket_addrs().ok()?;
        addrs
            .into_iter()
            .find(|addr| TcpStream::connect_timeout(addr, PROBE_TIMEOUT).is_ok())
    }

    fn feed_jobs(link: Arc<Link>, events: EventSender, generation: u64, interval: Duration) {
        // difficulty 2^32
        let boundary = U256::one() << 224usize;
        let mut serial: u64 = 0;

        while link.connected.load(Ordering::Relaxed)
            && link.generation.load(Ordering::Relaxed) == generation
        {
            serial += 1;
            // every third announcement repeats the previous job
            let job = if serial % 3 == 0 { serial - 1 } else { serial };
            let mut header = [0u8; 32];
            header[..8].copy_from_slice(&job.to_be_bytes());
            header[8..16].copy_from_slice(&generation.to_be_bytes());
            events.work_received(WorkPackage::new(JobId::from(header), boundary));
            thread::sleep(interval);
        }
    }
}

impl PoolClient for SimulatedClient {
    fn connect(&self, endpoint: &Endpoint) {
        self.link.pending.store(true, Ordering::Relaxed);
        let generation = self.link.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let link = Arc::clone(&self.link);
        let events = self.events.clone();
        let endpoint = endpoint.clone();
        let interval = self.job_interval;

        thread::spawn(move || {
            let reached = Self::probe(&endpoint);
            *link.remote.lock().unwrap_or_else(PoisonError::into_inner) = reached;
            link.connected.store(reached.is_some(), Ordering::Relaxed);
            link.pending.store(false, Ordering::Relaxed);

            match reached {
                Some(addr) => {
                    log::debug!("Probe of {} reached {}", endpoint, addr);
                    events.connected();
                    Self::feed_jobs(link, events, generation, interval);
                }
                None => {
                    log::debug!("Probe of {} failed", endpoint);
                    events.disconnected();
                }
            }
        });
    }

    fn disconnect(&self) {
        self.link.generation.fetch_add(1, Ordering::Relaxed);
        if self.link.connected.swap(false, Ordering::Relaxed) {
            self.events.disconnected();
        }
    }

    fn is_connected(&self) -> bool {
        self.link.connected.load(Ordering::Relaxed)
    }

    fn is_pending(&self) -> bool {
        self.link.pending.load(Ordering::Relaxed)
    }

    fn submit_solution(&self, solution: &Solution) {
        let events = self.events.clone();
        let stale = solution.stale;
        thread::spawn(move || {
            thread::sleep(SUBMIT_ROUND_TRIP);
            events.solution_accepted(stale);
        });
    }

    fn submit_hashrate(&self, rate: &str) {
        log::debug!("eth_submitHashrate {}", rate);
    }

    fn active_endpoint(&self) -> String {
        let remote = *self.link.remote.lock().unwrap_or_else(PoisonError::into_inner);
        remote
            .map(|addr| format!(" [{}]", addr))
            .unwrap_or_default()
    }
}
