//! Search statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one branch-and-bound run.
///
/// # Example
///
/// ```
/// use mixdispatch_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_node(1);
/// stats.record_node(2);
/// stats.record_failure();
/// stats.record_solution();
///
/// assert_eq!(stats.nodes, 2);
/// assert_eq!(stats.max_depth, 2);
/// assert_eq!(stats.failures, 1);
/// assert_eq!(stats.solutions, 1);
/// ```
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Search nodes visited.
    pub nodes: u64,
    /// Nodes that failed during propagation or bounding.
    pub failures: u64,
    /// Improving solutions found.
    pub solutions: u64,
    /// Propagator executions.
    pub propagations: u64,
    /// Deepest choice-point depth reached.
    pub max_depth: usize,
    /// Wall time of the run, frozen by [`finish`](Self::finish).
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl SearchStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Time since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn record_node(&mut self, depth: usize) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_solution(&mut self) {
        self.solutions += 1;
    }

    pub fn set_propagations(&mut self, count: u64) {
        self.propagations = count;
    }

    pub fn finish(&mut self) {
        self.elapsed = self.elapsed();
    }

    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}
