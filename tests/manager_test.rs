// tests/manager_test.rs
mod common;

use common::{fast_settings, harness, header, wait_until};
use pool_manager_rs::{Backend, EngineMode, JobId, ManagerSettings, Solution, U256, WorkPackage};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};

fn work(n: u8) -> WorkPackage {
    WorkPackage::new(header(n), U256::one() << 224usize)
}

fn solution(n: u8, stale: bool) -> Solution {
    Solution {
        nonce: 0xdead_beef,
        header: header(n).into(),
        stale,
    }
}

#[test]
fn failover_visits_endpoints_in_order_then_exits() {
    let h = harness(fast_settings(2), &["a", "b", "exit"]);
    h.engine.running.store(true, Ordering::SeqCst);

    h.manager.start().unwrap();
    assert!(
        wait_until(|| !h.manager.is_running()),
        "manager must give up at the sentinel"
    );

    assert_eq!(h.client.dialed(), vec!["a", "a", "b", "b"]);
    assert!(
        !h.engine.running.load(Ordering::SeqCst),
        "engine must be stopped at the sentinel"
    );
    assert_eq!(h.engine.stops.load(Ordering::SeqCst), 1);
    assert_eq!(h.manager.stats().failovers, 2);
    assert!(h.manager.active_endpoint().is_none());
    assert_eq!(
        h.engine.pool_addresses.lock().unwrap()[0],
        ("a".to_string(), 4444)
    );
}

#[test]
fn failover_wraps_after_last_endpoint() {
    let h = harness(fast_settings(1), &["a", "b"]);

    h.manager.start().unwrap();
    assert!(wait_until(|| h.client.dialed().len() >= 5));
    assert!(h.manager.is_running(), "without a sentinel the rotation never ends");
    h.manager.stop();

    assert_eq!(h.client.dialed()[..5], ["a", "b", "a", "b", "a"]);
}

#[test]
fn sentinel_first_stops_without_dialing() {
    let h = harness(fast_settings(3), &["exit", "a"]);

    h.manager.start().unwrap();
    assert!(wait_until(|| !h.manager.is_running()));
    assert!(h.client.dialed().is_empty());
}

#[test]
fn pending_state_defers_dialing() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);

    h.manager.start().unwrap();
    thread::sleep(Duration::from_millis(40));
    assert!(h.client.dialed().is_empty(), "no dialing while pending");

    h.client.pending.store(false, Ordering::SeqCst);
    assert!(wait_until(|| !h.client.dialed().is_empty()));
    h.manager.stop();
}

#[test]
fn connected_resets_attempts_and_starts_mixed_engine() {
    let settings = ManagerSettings {
        engine_mode: EngineMode::Mixed,
        tick: Duration::from_millis(20),
        ..fast_settings(3)
    };
    let h = harness(settings, &["a", "exit"]);

    h.manager.start().unwrap();
    assert!(wait_until(|| !h.client.dialed().is_empty()));
    h.client.pending.store(true, Ordering::SeqCst);
    thread::sleep(Duration::from_millis(30));
    let before = h.client.dialed().len();

    h.events.connected();
    assert!(wait_until(|| !h.engine.starts().is_empty()));
    assert_eq!(
        h.engine.starts(),
        vec![(Backend::Cuda, false), (Backend::OpenCl, true)]
    );

    // connection drops: engine keeps running, endpoint gets a fresh set of attempts
    h.events.disconnected();
    h.client.pending.store(false, Ordering::SeqCst);
    assert!(wait_until(|| !h.manager.is_running()));

    assert_eq!(h.client.dialed().len(), before + 3);
    assert_eq!(h.engine.stops.load(Ordering::SeqCst), 1, "stopped once, at the sentinel");
}

#[test]
fn duplicate_work_reaches_engine_once() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    h.events.work_received(work(1));
    h.events.work_received(work(1));
    h.events.work_received(work(2));
    assert!(wait_until(|| h.engine.work_count() == 2));
    thread::sleep(Duration::from_millis(20));

    let headers: Vec<_> = h.engine.work.lock().unwrap().iter().map(|w| w.header).collect();
    assert_eq!(headers, vec![JobId::from(header(1)), JobId::from(header(2))]);
    assert_eq!(h.manager.stats().duplicate_jobs, 1);
    h.manager.stop();
}

#[test]
fn fifth_distinct_job_evicts_oldest() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    for n in 1..=5 {
        h.events.work_received(work(n));
    }
    // 1 was evicted by 5, 5 is still remembered
    h.events.work_received(work(1));
    h.events.work_received(work(5));
    h.events.work_received(work(9));
    assert!(wait_until(|| h.engine.work_count() == 7));

    let headers: Vec<_> = h.engine.work.lock().unwrap().iter().map(|w| w.header).collect();
    let expected: Vec<JobId> = [1, 2, 3, 4, 5, 1, 9]
        .iter()
        .map(|n| JobId::from(header(*n)))
        .collect();
    assert_eq!(headers, expected);
    h.manager.stop();
}

#[test]
fn solution_while_disconnected_is_discarded() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    h.events.solution_found(solution(1, false));
    h.events.work_received(work(1));
    assert!(wait_until(|| h.engine.work_count() == 1));

    assert!(h.client.solutions.lock().unwrap().is_empty());
    let stats = h.manager.stats();
    assert_eq!(stats.solutions_discarded, 1);
    assert_eq!(stats.solutions_submitted, 0);
    h.manager.stop();
}

#[test]
fn accepted_latency_covers_round_trip() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.set_connected(true);
    h.manager.start().unwrap();

    h.events.solution_found(solution(1, false));
    assert!(wait_until(|| h.client.solutions.lock().unwrap().len() == 1));
    thread::sleep(Duration::from_millis(30));
    h.events.solution_accepted(false);
    assert!(wait_until(|| h.engine.accepted.lock().unwrap().len() == 1));

    let stats = h.manager.stats();
    assert_eq!(stats.accepted, 1);
    assert!(
        stats.last_latency >= Duration::from_millis(30),
        "latency {:?} shorter than the round trip",
        stats.last_latency
    );

    // a result without an outstanding submission still reaches engine accounting
    h.events.solution_rejected(true);
    assert!(wait_until(|| h.engine.rejected.lock().unwrap().len() == 1));
    assert_eq!(*h.engine.rejected.lock().unwrap(), vec![true]);
    assert_eq!(h.manager.stats().rejected_stale, 1);
    h.manager.stop();
}

#[test]
fn restart_request_cycles_engine() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.engine.running.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    h.events.restart_requested();
    assert!(wait_until(|| !h.engine.starts().is_empty()));
    assert_eq!(h.engine.stops.load(Ordering::SeqCst), 1);
    assert_eq!(h.engine.starts(), vec![(Backend::OpenCl, false)]);
    h.manager.stop();
}

#[test]
fn hashrate_reported_as_padded_hex() {
    let settings = ManagerSettings {
        report_hashrate: true,
        report_interval: Duration::from_millis(10),
        ..fast_settings(3)
    };
    let h = harness(settings, &["a"]);
    h.client.set_connected(true);
    h.engine.rate.store(1, Ordering::SeqCst);
    h.manager.start().unwrap();

    assert!(wait_until(|| !h.client.hashrates.lock().unwrap().is_empty()));
    h.manager.stop();

    let reports = h.client.hashrates.lock().unwrap().clone();
    assert_eq!(reports[0], format!("0x{}1", "0".repeat(63)));
    assert!(h.manager.stats().hashrate_reports >= 1);
}

#[test]
fn hashrate_reports_wait_for_interval_then_repeat() {
    // 20ms over a 5ms tick: a report on every fifth tick
    let settings = ManagerSettings {
        report_hashrate: true,
        report_interval: Duration::from_millis(20),
        ..fast_settings(3)
    };
    let h = harness(settings, &["a"]);
    h.client.set_connected(true);
    h.engine.rate.store(25_000_000, Ordering::SeqCst);
    h.manager.start().unwrap();

    assert!(wait_until(|| h.client.report_ticks.lock().unwrap().len() >= 3));
    h.manager.stop();

    let ticks = h.client.report_ticks.lock().unwrap().clone();
    assert_eq!(ticks[..3], [5, 10, 15]);
}

#[test]
fn difficulty_logged_only_when_boundary_changes() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    let easy = U256::one() << 224usize;
    let hard = U256::one() << 200usize;
    h.events.work_received(WorkPackage::new(header(1), easy));
    h.events.work_received(WorkPackage::new(header(2), easy));
    h.events.work_received(WorkPackage::new(header(3), hard));
    assert!(wait_until(|| h.engine.work_count() == 3));

    assert_eq!(h.manager.stats().difficulty_changes, 2);
    h.manager.stop();
}

#[test]
fn restart_ignores_events_from_previous_session() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.pending.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();
    h.manager.stop();

    // published while stopped
    h.events.solution_found(Solution {
        nonce: 7,
        header: header(1).into(),
        stale: false,
    });
    h.events.connected();

    h.client.set_connected(true);
    h.manager.start().unwrap();
    h.events.work_received(work(2));
    assert!(wait_until(|| h.engine.work_count() == 1));

    assert!(
        h.client.solutions.lock().unwrap().is_empty(),
        "solution from the stopped session reached the new connection"
    );
    assert!(h.engine.starts().is_empty());
    assert_eq!(h.manager.stats().solutions_submitted, 0);
    h.manager.stop();
}

#[test]
fn stop_disconnects_then_stops_engine() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.set_connected(true);
    h.engine.running.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    h.manager.stop();
    assert!(!h.manager.is_running());
    assert_eq!(h.client.disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(h.engine.stops.load(Ordering::SeqCst), 1);

    // stopping twice is harmless
    h.manager.stop();
    assert_eq!(h.client.disconnects.load(Ordering::SeqCst), 1);
}

#[test]
fn grace_period_is_cut_short_by_stop() {
    let settings = ManagerSettings {
        failover_grace: Duration::from_secs(10),
        ..fast_settings(1)
    };
    let h = harness(settings, &["a", "b"]);
    h.engine.running.store(true, Ordering::SeqCst);
    h.manager.start().unwrap();

    assert!(wait_until(|| h.engine.stops.load(Ordering::SeqCst) == 1));
    let started = Instant::now();
    h.manager.stop();
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "stop waited out the grace period"
    );
    assert_eq!(h.client.dialed(), vec!["a"]);
}

#[test]
fn clear_endpoints_resets_pool_address_and_disconnects() {
    let h = harness(fast_settings(3), &["a"]);
    h.client.set_connected(true);

    h.manager.clear_endpoints();
    assert_eq!(h.manager.endpoint_count(), 0);
    assert_eq!(h.client.disconnects.load(Ordering::SeqCst), 1);
    assert_eq!(
        *h.engine.pool_addresses.lock().unwrap(),
        vec![(String::new(), 0)]
    );
    assert!(h.manager.start().is_err());
}
