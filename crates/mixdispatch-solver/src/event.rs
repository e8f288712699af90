//! Listeners for solve progress.
//!
//! Listeners are called synchronously from the search thread, in
//! registration order. A listener that wants to stop the search raises the
//! solver's early-termination flag; the search notices it at the next node.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use mixdispatch_solver::event::{SolutionListener, SolveEventSupport};
//! use mixdispatch_solver::report::Schedule;
//!
//! #[derive(Debug)]
//! struct Printer;
//!
//! impl SolutionListener for Printer {
//!     fn on_incumbent(&self, schedule: &Schedule) {
//!         println!("new best cost {}", schedule.cost);
//!     }
//! }
//!
//! let mut support = SolveEventSupport::new();
//! support.add_listener(Arc::new(Printer));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::info;

use mixdispatch_core::ProblemInstance;

use crate::report::Schedule;
use crate::search::SearchStatus;

/// Receives incumbents and lifecycle notifications.
pub trait SolutionListener: Send + Sync + Debug {
    /// Called for every strictly improving solution.
    fn on_incumbent(&self, schedule: &Schedule);

    fn on_search_started(&self, _instance: &ProblemInstance) {}

    /// Called once, after the last incumbent.
    fn on_search_finished(&self, _status: SearchStatus, _best: Option<&Schedule>) {}
}

/// Broadcasts solve events to registered listeners.
#[derive(Default)]
pub struct SolveEventSupport {
    listeners: Vec<Arc<dyn SolutionListener>>,
}

impl SolveEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolutionListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn fire_search_started(&self, instance: &ProblemInstance) {
        for listener in &self.listeners {
            listener.on_search_started(instance);
        }
    }

    pub fn fire_incumbent(&self, schedule: &Schedule) {
        for listener in &self.listeners {
            listener.on_incumbent(schedule);
        }
    }

    pub fn fire_search_finished(&self, status: SearchStatus, best: Option<&Schedule>) {
        for listener in &self.listeners {
            listener.on_search_finished(status, best);
        }
    }
}

impl Debug for SolveEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Logs incumbents and the final status through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingListener {
    prefix: String,
}

impl LoggingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl SolutionListener for LoggingListener {
    fn on_incumbent(&self, schedule: &Schedule) {
        info!(
            "{}new incumbent: cost {} after {} nodes, {} trips",
            self.prefix,
            schedule.cost,
            schedule.found_at_node,
            schedule.total_trips()
        );
    }

    fn on_search_started(&self, instance: &ProblemInstance) {
        info!(
            "{}search started: {} orders, {} vehicles",
            self.prefix,
            instance.num_orders(),
            instance.num_vehicles()
        );
    }

    fn on_search_finished(&self, status: SearchStatus, best: Option<&Schedule>) {
        match best {
            Some(s) => info!("{}search {}: cost {}", self.prefix, status, s.cost),
            None => info!("{}search {}: no solution", self.prefix, status),
        }
    }
}

/// Counts events and remembers incumbent costs.
#[derive(Debug, Default)]
pub struct CountingListener {
    incumbent_count: AtomicUsize,
    started_count: AtomicUsize,
    finished_count: AtomicUsize,
    costs: Mutex<Vec<i64>>,
    status: Mutex<Option<SearchStatus>>,
}

impl CountingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incumbent_count(&self) -> usize {
        self.incumbent_count.load(Ordering::SeqCst)
    }

    pub fn started_count(&self) -> usize {
        self.started_count.load(Ordering::SeqCst)
    }

    pub fn finished_count(&self) -> usize {
        self.finished_count.load(Ordering::SeqCst)
    }

    /// Incumbent costs in the order they were reported.
    pub fn costs(&self) -> Vec<i64> {
        self.costs.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_status(&self) -> Option<SearchStatus> {
        self.status.lock().ok().and_then(|s| *s)
    }

    pub fn reset(&self) {
        self.incumbent_count.store(0, Ordering::SeqCst);
        self.started_count.store(0, Ordering::SeqCst);
        self.finished_count.store(0, Ordering::SeqCst);
        if let Ok(mut costs) = self.costs.lock() {
            costs.clear();
        }
        if let Ok(mut status) = self.status.lock() {
            *status = None;
        }
    }
}

impl SolutionListener for CountingListener {
    fn on_incumbent(&self, schedule: &Schedule) {
        self.incumbent_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut costs) = self.costs.lock() {
            costs.push(schedule.cost);
        }
    }

    fn on_search_started(&self, _instance: &ProblemInstance) {
        self.started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_search_finished(&self, status: SearchStatus, _best: Option<&Schedule>) {
        self.finished_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut s) = self.status.lock() {
            *s = Some(status);
        }
    }
}

/// Event streamed by [`ChannelListener`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveEvent {
    Incumbent(Schedule),
    Finished {
        status: SearchStatus,
        best_cost: Option<i64>,
    },
}

/// Streams incumbents over an unbounded channel.
///
/// Sends never block the search; events are dropped once the receiver is
/// gone.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<SolveEvent>,
}

impl ChannelListener {
    pub fn new(sender: mpsc::UnboundedSender<SolveEvent>) -> Self {
        Self { sender }
    }

    /// Creates a listener together with its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SolveEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl SolutionListener for ChannelListener {
    fn on_incumbent(&self, schedule: &Schedule) {
        let _ = self.sender.send(SolveEvent::Incumbent(schedule.clone()));
    }

    fn on_search_finished(&self, status: SearchStatus, best: Option<&Schedule>) {
        let _ = self.sender.send(SolveEvent::Finished {
            status,
            best_cost: best.map(|s| s.cost),
        });
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
