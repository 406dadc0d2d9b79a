// src/manager/session.rs
//! Control loop
//!
//! The session owns the per-run state (job history, last boundary, the
//! outstanding submission and the report pacing counter) and is the only
//! writer of the endpoint rotation. It multiplexes collaborator events with
//! a fixed ticker; every tick it decides between waiting, dialing the same
//! endpoint again, failing over, or giving up.

use crate::manager::events::Event;
use crate::manager::manager::Shared;
use crate::miner::work::{Solution, U256, WorkPackage};
use crate::pool::dedup::JobHistory;
use crate::pool::endpoint::Endpoint;
use crate::stats::difficulty::difficulty_to_display;
use crate::stats::hashrate::encode_hashrate;
use crossbeam_channel::{Receiver, select, tick};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which the failover grace period checks for shutdown
const GRACE_SLICE: Duration = Duration::from_millis(250);

/// Endpoint picked for the next dial
struct Selection {
    index: usize,
    attempt: u32,
    max_attempts: u32,
    last: bool,
    endpoint: Endpoint,
}

pub(crate) struct Session {
    shared: Arc<Shared>,
    history: JobHistory,
    last_boundary: Option<U256>,
    submitted_at: Option<Instant>,
    report_ticks: u64,
    report_threshold: u64,
}

impl Session {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let tick_ms = shared.settings.tick.as_millis().max(1);
        let report_threshold =
            u64::try_from(shared.settings.report_interval.as_millis() / tick_ms).unwrap_or(u64::MAX);

        Session {
            shared,
            history: JobHistory::new(),
            last_boundary: None,
            submitted_at: None,
            report_ticks: 0,
            report_threshold,
        }
    }

    /// Runs until the running flag is cleared or the event channel closes
    pub(crate) fn run(mut self, events: Receiver<Event>) {
        let ticker = tick(self.shared.settings.tick);
        log::debug!(
            "Control loop started (tick {:?}, {} attempts per endpoint)",
            self.shared.settings.tick,
            self.shared.settings.max_attempts
        );

        self.on_tick();
        while self.shared.is_running() {
            select! {
                recv(events) -> event => match event {
                    Ok(event) => self.handle(event),
                    Err(_) => break,
                },
                recv(ticker) -> _ => self.on_tick(),
            }
        }

        log::debug!("Control loop stopped");
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Connected => self.on_connected(),
            Event::Disconnected => self.on_disconnected(),
            Event::WorkReceived(work) => self.on_work(work),
            Event::SolutionAccepted { stale } => self.on_accepted(stale),
            Event::SolutionRejected { stale } => self.on_rejected(stale),
            Event::SolutionFound(solution) => self.on_solution(solution),
            Event::RestartRequested => self.on_restart(),
            Event::Wake => {}
        }
    }

    fn on_tick(&mut self) {
        let client = &self.shared.client;
        // Connecting or disconnecting: wait for the client to settle.
        if !client.is_pending() && !client.is_connected() {
            self.select_endpoint();
            if !self.shared.is_running() {
                return;
            }
        }

        self.report_hashrate();
    }

    /// Dials the active endpoint, failing over first once it used up its attempts
    fn select_endpoint(&mut self) {
        if self.shared.endpoints().is_exhausted() {
            self.shared.stats.failover();
            if self.shared.engine.is_running() {
                log::info!("Shutting down miners...");
                self.shared.engine.stop();
                if !self.grace_period() {
                    return;
                }
            }
            self.shared.endpoints().rotate();
        }

        let selected = {
            let mut endpoints = self.shared.endpoints();
            let current = endpoints.current().cloned();
            match current {
                Some(endpoint) if !endpoint.is_exit() => {
                    let last = endpoints.record_attempt();
                    Some(Selection {
                        index: endpoints.active_index(),
                        attempt: endpoints.attempts(),
                        max_attempts: endpoints.max_attempts(),
                        last,
                        endpoint,
                    })
                }
                _ => None,
            }
        };

        let Some(Selection {
            index,
            attempt,
            max_attempts,
            last,
            endpoint,
        }) = selected
        else {
            self.give_up();
            return;
        };

        log::info!(
            "Selected pool #{} {} (attempt {}/{}{})",
            index,
            endpoint,
            attempt,
            max_attempts,
            if last { ", last before failover" } else { "" }
        );
        self.shared
            .engine
            .set_pool_address(endpoint.host(), endpoint.port());
        self.shared.client.connect(&endpoint);
        self.shared.active.store(Some(Arc::new(endpoint)));
    }

    /// Failover reached the sentinel (or nothing is configured)
    fn give_up(&mut self) {
        log::warn!("No more failover connections.");
        if self.shared.engine.is_running() {
            log::info!("Shutting down miners...");
            self.shared.engine.stop();
        }
        self.shared.active.store(None);
        self.shared.running.store(false, Ordering::Relaxed);
    }

    /// Lets engine backends release their devices before the next dial
    ///
    /// Returns `false` if shutdown was requested meanwhile.
    fn grace_period(&self) -> bool {
        let deadline = Instant::now() + self.shared.settings.failover_grace;
        let mut announced = None;

        while self.shared.is_running() {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            let remaining = deadline - now;
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            if announced != Some(secs) {
                log::info!("Retrying in {}...", secs);
                announced = Some(secs);
            }
            thread::sleep(remaining.min(GRACE_SLICE));
        }

        false
    }

    fn report_hashrate(&mut self) {
        if !self.shared.settings.report_hashrate {
            return;
        }

        self.report_ticks += 1;
        if self.report_ticks > self.report_threshold {
            let rate = self.shared.engine.current_rate();
            let encoded = encode_hashrate(rate);
            log::debug!("Reporting hashrate {} H/s as {}", rate, encoded);
            self.shared.client.submit_hashrate(&encoded);
            self.shared.stats.hashrate_reported();
            self.report_ticks = 0;
        }
    }

    fn on_connected(&mut self) {
        self.shared.endpoints().reset_attempts();
        log::info!(
            "Connected to {}{}",
            self.host(),
            self.shared.client.active_endpoint()
        );

        if !self.shared.engine.is_running() {
            log::info!("Spinning up miners...");
            self.start_engine();
        }
    }

    fn on_disconnected(&mut self) {
        // The engine keeps running: the next tick decides between a fast
        // reconnect to the same endpoint and a failover.
        log::info!(
            "Disconnected from {}{}",
            self.host(),
            self.shared.client.active_endpoint()
        );
    }

    fn on_work(&mut self, work: WorkPackage) {
        if !self.history.check_and_record(work.header) {
            log::warn!("Duplicate job {} discarded", work.header.abridged());
            self.shared.stats.duplicate_job();
            return;
        }

        log::info!(
            "New job {}  {}{}",
            work.header.abridged(),
            self.host(),
            self.shared.client.active_endpoint()
        );

        if self.last_boundary != Some(work.boundary) {
            self.last_boundary = Some(work.boundary);
            self.shared.stats.difficulty_changed();
            match difficulty_to_display(&work.boundary) {
                Some(difficulty) => log::info!("New pool difficulty: {}", difficulty),
                None => log::warn!("Pool sent a zero boundary"),
            }
        }

        self.shared.stats.job_received();
        self.shared.engine.set_work(&work);
    }

    fn on_accepted(&mut self, stale: bool) {
        let latency = self.take_latency();
        log::info!(
            "**Accepted{} {:>4}ms.   {}{}",
            if stale { " (stale)" } else { "" },
            latency.as_millis(),
            self.host(),
            self.shared.client.active_endpoint()
        );
        self.shared.stats.solution_accepted(stale, latency);
        self.shared.engine.accepted_solution(stale);
    }

    fn on_rejected(&mut self, stale: bool) {
        let latency = self.take_latency();
        log::warn!(
            "**Rejected{} {:>4}ms.   {}{}",
            if stale { " (stale)" } else { "" },
            latency.as_millis(),
            self.host(),
            self.shared.client.active_endpoint()
        );
        self.shared.stats.solution_rejected(stale, latency);
        self.shared.engine.rejected_solution(stale);
    }

    fn on_solution(&mut self, solution: Solution) {
        // Without a live connection the job context is gone; nothing to retry.
        if !self.shared.client.is_connected() {
            log::warn!(
                "Nonce {:#018x} wasted. Waiting for connection ...",
                solution.nonce
            );
            self.shared.stats.solution_discarded();
            return;
        }

        self.submitted_at = Some(Instant::now());
        if solution.stale {
            log::info!("Stale nonce {:#018x}", solution.nonce);
        } else {
            log::info!("Nonce {:#018x}", solution.nonce);
        }
        self.shared.client.submit_solution(&solution);
        self.shared.stats.solution_submitted();
    }

    fn on_restart(&mut self) {
        log::info!("Restart miners...");
        if self.shared.engine.is_running() {
            log::info!("Shutting down miners...");
            self.shared.engine.stop();
        }
        log::info!("Spinning up miners...");
        self.start_engine();
    }

    fn start_engine(&self) {
        let mode = self.shared.settings.engine_mode;
        for (i, backend) in mode.backends().iter().enumerate() {
            if let Err(e) = self.shared.engine.start(*backend, i > 0) {
                log::error!("Failed to start {} backend: {}", backend, e);
            }
        }
    }

    /// Round trip of the outstanding submission, zero if none is recorded
    fn take_latency(&mut self) -> Duration {
        match self.submitted_at.take() {
            Some(sent) => sent.elapsed(),
            None => {
                log::debug!("Submission result without a recorded submission");
                Duration::ZERO
            }
        }
    }

    fn host(&self) -> String {
        self.shared
            .active
            .load_full()
            .map(|endpoint| endpoint.host().to_string())
            .unwrap_or_default()
    }
}
