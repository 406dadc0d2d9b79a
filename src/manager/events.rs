// src/manager/events.rs
//! Event channel between collaborators and the control loop
//!
//! Client and engine callbacks are re-expressed as messages on an
//! unbounded channel. Publishing never blocks, so collaborators may publish
//! from their own I/O or worker threads.

use crate::miner::work::{Solution, WorkPackage};
use crate::utils::error::PoolError;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Something that happened on the client or engine side
#[derive(Debug, Clone)]
pub enum Event {
    /// Client established a session with the selected endpoint
    Connected,
    /// Client lost or closed its session
    Disconnected,
    /// Pool announced work
    WorkReceived(WorkPackage),
    /// Pool accepted the outstanding solution
    SolutionAccepted {
        /// Solution was computed for an outdated job
        stale: bool,
    },
    /// Pool rejected the outstanding solution
    SolutionRejected {
        /// Solution was computed for an outdated job
        stale: bool,
    },
    /// Engine found a candidate
    SolutionFound(Solution),
    /// Engine asks for a full stop/start cycle
    RestartRequested,
    /// Nudges the control loop so it notices a shutdown
    Wake,
}

/// Creates the event channel of one manager
///
/// The sender goes to the collaborators, the receiver to [`PoolManager::new`](crate::manager::PoolManager::new).
pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = unbounded();
    (
        EventSender { tx: tx.clone() },
        EventReceiver { tx, rx },
    )
}

/// Receiving side of the event channel, consumed by the control loop
#[derive(Debug)]
pub struct EventReceiver {
    pub(crate) tx: Sender<Event>,
    pub(crate) rx: Receiver<Event>,
}

/// Cloneable publishing handle given to the client and engine
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    pub(crate) fn new(tx: Sender<Event>) -> Self {
        EventSender { tx }
    }

    /// Publishes an event to the control loop
    ///
    /// # Errors
    /// Returns `PoolError::ChannelError` once the manager has been dropped.
    pub fn publish(&self, event: Event) -> Result<(), PoolError> {
        self.tx.send(event)?;
        Ok(())
    }

    /// Client connected
    pub fn connected(&self) {
        self.publish_or_log(Event::Connected);
    }

    /// Client disconnected
    pub fn disconnected(&self) {
        self.publish_or_log(Event::Disconnected);
    }

    /// Client received work
    pub fn work_received(&self, work: WorkPackage) {
        self.publish_or_log(Event::WorkReceived(work));
    }

    /// Pool accepted the last submission
    pub fn solution_accepted(&self, stale: bool) {
        self.publish_or_log(Event::SolutionAccepted { stale });
    }

    /// Pool rejected the last submission
    pub fn solution_rejected(&self, stale: bool) {
        self.publish_or_log(Event::SolutionRejected { stale });
    }

    /// Engine found a solution
    pub fn solution_found(&self, solution: Solution) {
        self.publish_or_log(Event::SolutionFound(solution));
    }

    /// Engine wants to be restarted
    pub fn restart_requested(&self) {
        self.publish_or_log(Event::RestartRequested);
    }

    fn publish_or_log(&self, event: Event) {
        if let Err(e) = self.publish(event) {
            log::debug!("Dropping event, manager is gone: {}", e);
        }
    }
}
